use super::measure::{Measurement, measurements_from};
use super::overlay::{self, OverlaySamples};
use crate::core::models::store::ChargeStore;
use crate::core::physics::electrostatics::forces_on_all;
use crate::core::physics::force::ForceResult;
use crate::core::sampling::grid::Viewport;
use crate::core::sampling::overlay::{FieldSegment, OverlayMode, PotentialCell};
use crate::engine::config::LabConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// What the presentation layer wants drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameRequest {
    /// Canvas size, or `None` before layout.
    pub viewport: Option<Viewport>,
    pub show_field: bool,
    pub show_potential: bool,
}

/// Everything derived from one store snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub forces: Vec<ForceResult>,
    pub measurements: Vec<Measurement>,
    pub field: Vec<FieldSegment>,
    pub potential: Vec<PotentialCell>,
}

/// Recomputes a full frame from the store.
///
/// Overlays are sampled only when requested and only once the viewport is known.
#[instrument(skip_all, name = "frame_workflow", fields(charges = store.len()))]
pub fn run(
    store: &ChargeStore,
    request: &FrameRequest,
    config: &LabConfig,
    reporter: &ProgressReporter,
) -> Result<Frame, EngineError> {
    let charges = store.snapshot();

    reporter.report(Progress::PhaseStart { name: "Forces" });
    let forces = forces_on_all(charges);
    let measurements = measurements_from(
        charges,
        &forces,
        request.viewport.as_ref(),
        config.store.marker_size,
    );
    reporter.report(Progress::PhaseFinish);

    let mut frame = Frame {
        forces,
        measurements,
        ..Frame::default()
    };

    let Some(viewport) = request.viewport.filter(|v| v.is_known()) else {
        if request.show_field || request.show_potential {
            info!("Viewport not laid out yet; skipping overlays.");
            reporter.report(Progress::Message(
                "Overlays wait for the viewport to be laid out.".to_string(),
            ));
        }
        return Ok(frame);
    };

    if request.show_field {
        reporter.report(Progress::PhaseStart {
            name: "Electric field",
        });
        if let OverlaySamples::Field(segments) = overlay::run(
            charges,
            viewport,
            OverlayMode::Vector,
            &config.overlay,
            reporter,
        )? {
            frame.field = segments;
        }
        reporter.report(Progress::PhaseFinish);
    }

    if request.show_potential {
        reporter.report(Progress::PhaseStart { name: "Potential" });
        if let OverlaySamples::Potential(cells) = overlay::run(
            charges,
            viewport,
            OverlayMode::Scalar,
            &config.overlay,
            reporter,
        )? {
            frame.potential = cells;
        }
        reporter.report(Progress::PhaseFinish);
    }

    Ok(frame)
}
