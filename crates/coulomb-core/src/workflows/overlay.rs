use crate::core::models::charge::Charge;
use crate::core::sampling::grid::{GridSpec, Viewport};
use crate::core::sampling::overlay::{
    FieldSegment, OverlayMode, PotentialCell, PotentialSampler, VectorFieldSampler,
};
use crate::engine::config::OverlaySettings;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, instrument};

/// Collected samples of one overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlaySamples {
    Field(Vec<FieldSegment>),
    Potential(Vec<PotentialCell>),
}

impl OverlaySamples {
    pub fn mode(&self) -> OverlayMode {
        match self {
            OverlaySamples::Field(_) => OverlayMode::Vector,
            OverlaySamples::Potential(_) => OverlayMode::Scalar,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OverlaySamples::Field(segments) => segments.len(),
            OverlaySamples::Potential(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the grid an overlay is sampled on, honoring the mode's configured step.
pub fn grid_for(
    viewport: Viewport,
    mode: OverlayMode,
    settings: &OverlaySettings,
) -> Result<GridSpec, EngineError> {
    Ok(GridSpec::new(viewport, settings.step_for(mode))?)
}

/// Samples one overlay over `viewport`.
///
/// An unknown viewport (not laid out yet), or one too large to sample, yields an empty
/// result without touching the physics. The reporter is told why.
#[instrument(skip_all, name = "overlay_workflow", fields(mode = %mode, charges = charges.len()))]
pub fn run(
    charges: &[Charge],
    viewport: Viewport,
    mode: OverlayMode,
    settings: &OverlaySettings,
    reporter: &ProgressReporter,
) -> Result<OverlaySamples, EngineError> {
    let grid = grid_for(viewport, mode, settings)?;
    debug!(
        columns = grid.columns(),
        rows = grid.rows(),
        step = grid.step(),
        "Sampling overlay grid."
    );
    if grid.is_empty() {
        reporter.report(Progress::Message(format!(
            "No {mode} samples for a {}x{} viewport.",
            viewport.width, viewport.height
        )));
        return Ok(match mode {
            OverlayMode::Vector => OverlaySamples::Field(Vec::new()),
            OverlayMode::Scalar => OverlaySamples::Potential(Vec::new()),
        });
    }

    reporter.report(Progress::TaskStart {
        total_steps: grid.len() as u64,
    });
    let samples = match mode {
        OverlayMode::Vector => {
            let sampler = VectorFieldSampler::new(charges, grid, settings.vector_scale);
            OverlaySamples::Field(collect_by_column(sampler.samples(), grid.rows(), reporter))
        }
        OverlayMode::Scalar => {
            let sampler = PotentialSampler::new(charges, grid, settings.potential_normalization);
            OverlaySamples::Potential(collect_by_column(
                sampler.samples(),
                grid.rows(),
                reporter,
            ))
        }
    };
    reporter.report(Progress::TaskFinish);

    Ok(samples)
}

fn collect_by_column<T>(
    samples: impl ExactSizeIterator<Item = T>,
    rows: usize,
    reporter: &ProgressReporter,
) -> Vec<T> {
    let mut collected = Vec::with_capacity(samples.len());
    for sample in samples {
        collected.push(sample);
        if !reporter.is_silent() && collected.len() % rows == 0 {
            reporter.report(Progress::TaskAdvance { steps: rows as u64 });
        }
    }
    collected
}
