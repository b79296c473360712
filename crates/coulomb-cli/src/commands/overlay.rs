use super::load_scene;
use crate::cli::OverlayArgs;
use crate::config::PartialLabConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use coulomblab::core::io::export;
use coulomblab::core::sampling::grid::Viewport;
use coulomblab::core::sampling::overlay::OverlayMode;
use coulomblab::engine::error::EngineError;
use coulomblab::engine::progress::{Progress, ProgressReporter};
use coulomblab::workflows::overlay::{self, OverlaySamples};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: OverlayArgs) -> Result<()> {
    let config = PartialLabConfig::load(args.config.config.as_deref())?
        .merge_with_cli(&args.config, args.step.map(|step| (args.mode, step)))?;
    let lab = load_scene(&args.scene, &config)?;
    let viewport = resolve_viewport(args.width, args.height, lab.viewport)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Sampling {} overlay over {}x{}...", args.mode, viewport.width, viewport.height);
    reporter.report(Progress::PhaseStart {
        name: match args.mode {
            OverlayMode::Vector => "Electric field",
            OverlayMode::Scalar => "Potential",
        },
    });
    let samples = overlay::run(
        lab.store.snapshot(),
        viewport,
        args.mode,
        &config.overlay,
        &reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    if samples.is_empty() {
        warn!("Overlay grid is empty; nothing was sampled.");
    }

    info!("Writing {} sample(s) to {:?}", samples.len(), &args.output);
    let writer = BufWriter::new(File::create(&args.output)?);
    let written = match &samples {
        OverlaySamples::Field(segments) => export::write_field_segments(writer, segments),
        OverlaySamples::Potential(cells) => export::write_potential_cells(writer, cells),
    }
    .map_err(EngineError::from)?;
    println!(
        "✓ {} {} sample(s) written to: {}",
        written,
        samples.mode(),
        args.output.display()
    );
    Ok(())
}

/// Flags win over the scene file, dimension by dimension.
fn resolve_viewport(
    width: Option<f64>,
    height: Option<f64>,
    scene: Option<Viewport>,
) -> Result<Viewport> {
    let width = width.or(scene.map(|v| v.width));
    let height = height.or(scene.map(|v| v.height));
    match (width, height) {
        (Some(width), Some(height)) => Ok(Viewport::new(width, height)),
        _ => Err(CliError::Argument(
            "Overlay needs a viewport: add a [viewport] table to the scene or pass --width and --height."
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigArgs;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn flags_override_scene_viewport_per_dimension() {
        let scene = Some(Viewport::new(360.0, 320.0));
        assert_eq!(
            resolve_viewport(Some(90.0), None, scene).unwrap(),
            Viewport::new(90.0, 320.0)
        );
        assert_eq!(
            resolve_viewport(None, None, scene).unwrap(),
            Viewport::new(360.0, 320.0)
        );
    }

    #[test]
    fn missing_viewport_is_an_argument_error() {
        assert!(matches!(
            resolve_viewport(Some(90.0), None, None),
            Err(CliError::Argument(_))
        ));
    }

    fn write_scene(dir: &std::path::Path) -> PathBuf {
        let scene = dir.join("scene.toml");
        fs::write(
            &scene,
            "[viewport]\nwidth = 90.0\nheight = 90.0\n\n[[charges]]\nx = 30.0\ny = 45.0\nq = 10.0\n",
        )
        .unwrap();
        scene
    }

    #[test]
    fn vector_overlay_exports_one_row_per_grid_point() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("field.csv");
        run(OverlayArgs {
            scene: write_scene(dir.path()),
            mode: OverlayMode::Vector,
            step: None,
            width: None,
            height: None,
            config: ConfigArgs::default(),
            output: output.clone(),
        })
        .unwrap();

        let csv = fs::read_to_string(output).unwrap();
        assert_eq!(csv.lines().count(), 1 + 9);
        assert!(csv.starts_with("x,y,ex,ey,tip_x,tip_y\n"));
    }

    #[test]
    fn oversized_viewport_writes_no_samples() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("field.csv");
        run(OverlayArgs {
            scene: write_scene(dir.path()),
            mode: OverlayMode::Vector,
            step: None,
            width: Some(1e20),
            height: Some(1e20),
            config: ConfigArgs::default(),
            output: output.clone(),
        })
        .unwrap();

        assert!(fs::read_to_string(output).unwrap().is_empty());
    }

    #[test]
    fn step_flag_changes_the_potential_grid() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("potential.csv");
        run(OverlayArgs {
            scene: write_scene(dir.path()),
            mode: OverlayMode::Scalar,
            step: Some(45.0),
            width: None,
            height: None,
            config: ConfigArgs::default(),
            output: output.clone(),
        })
        .unwrap();

        let csv = fs::read_to_string(output).unwrap();
        assert_eq!(csv.lines().count(), 1 + 4);
        assert!(csv.starts_with("x,y,size,potential,intensity\n"));
    }
}
