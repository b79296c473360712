use super::load_scene;
use crate::cli::InspectArgs;
use crate::config::PartialLabConfig;
use crate::error::Result;
use coulomblab::core::models::charge::Charge;
use coulomblab::core::physics::electrostatics::{field_at, potential_at};
use nalgebra::Point2;
use tracing::debug;

pub fn run(args: InspectArgs) -> Result<()> {
    let config = PartialLabConfig::load(args.config.config.as_deref())?
        .merge_with_cli(&args.config, None)?;
    let lab = load_scene(&args.scene, &config)?;

    for point in &args.points {
        debug!(x = point.x, y = point.y, "Inspecting point.");
        println!("{}", describe(point, lab.store.snapshot()));
    }
    Ok(())
}

fn describe(point: &Point2<f64>, charges: &[Charge]) -> String {
    let field = field_at(point, charges);
    let potential = potential_at(point, charges);
    format!(
        "({}, {}): E = ({:.3e}, {:.3e}) N/C, |E| = {:.3e} N/C, V = {:.3e} V",
        point.x,
        point.y,
        field.x,
        field.y,
        field.norm(),
        potential
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use coulomblab::core::models::ids::ChargeId;

    #[test]
    fn empty_scene_reads_zero_everywhere() {
        let line = describe(&Point2::new(5.0, 5.0), &[]);
        assert_eq!(
            line,
            "(5, 5): E = (0.000e0, 0.000e0) N/C, |E| = 0.000e0 N/C, V = 0.000e0 V"
        );
    }

    #[test]
    fn field_right_of_a_positive_charge_points_away() {
        let charges = [Charge::new(ChargeId(1), Point2::new(0.0, 0.0), 10.0)];
        let line = describe(&Point2::new(10.0, 0.0), &charges);
        // k * 1e-8 / 100 = 0.899 N/C and k * 1e-8 / 10 = 8.99 V
        assert!(line.starts_with("(10, 0): E = (8.988e-1, 0.000e0) N/C"));
        assert!(line.ends_with("V = 8.988e0 V"));
    }
}
