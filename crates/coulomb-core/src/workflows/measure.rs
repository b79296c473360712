use crate::core::models::charge::Charge;
use crate::core::physics::electrostatics::forces_on_all;
use crate::core::physics::force::ForceResult;
use crate::core::sampling::grid::Viewport;
use serde::Serialize;

/// One row of the force readout, with the position expressed the way the lab canvas
/// labels it: whole units, y measured upward from the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// 1-based position of the charge in the store.
    pub label: usize,
    pub id: u64,
    pub polarity: char,
    pub magnitude_nc: f64,
    pub display_x: i64,
    pub display_y: i64,
    pub fx: f64,
    pub fy: f64,
    pub force: f64,
}

/// Rounds half-way cases toward positive infinity, as canvas labels do.
#[inline]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Canvas label coordinates of a charge.
///
/// With a known viewport the y axis is flipped so the bottom edge of the marker at the
/// bottom of the canvas reads as zero. Without one, the raw y is shown.
pub fn display_position(charge: &Charge, viewport: Option<&Viewport>, marker_size: f64) -> (i64, i64) {
    let x = round_half_up(charge.position.x);
    let y = match viewport.filter(|v| v.is_known()) {
        Some(v) => round_half_up(v.height - charge.position.y - marker_size),
        None => round_half_up(charge.position.y),
    };
    (x, y)
}

/// Pairs precomputed forces with their charges. `forces` must come from `charges`.
pub fn measurements_from(
    charges: &[Charge],
    forces: &[ForceResult],
    viewport: Option<&Viewport>,
    marker_size: f64,
) -> Vec<Measurement> {
    charges
        .iter()
        .zip(forces)
        .enumerate()
        .map(|(index, (charge, force))| {
            let (display_x, display_y) = display_position(charge, viewport, marker_size);
            Measurement {
                label: index + 1,
                id: charge.id.get(),
                polarity: charge.polarity().symbol(),
                magnitude_nc: charge.magnitude,
                display_x,
                display_y,
                fx: force.fx(),
                fy: force.fy(),
                force: force.magnitude,
            }
        })
        .collect()
}

/// Computes forces for `charges` and returns the readout rows in store order.
pub fn measure(charges: &[Charge], viewport: Option<&Viewport>, marker_size: f64) -> Vec<Measurement> {
    let forces = forces_on_all(charges);
    measurements_from(charges, &forces, viewport, marker_size)
}
