use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use coulomblab::core::io::scene::{Scene, SceneCharge, SceneViewport};
use coulomblab::engine::error::EngineError;
use tracing::info;

/// A dipole on a 360x320 canvas.
fn example_scene() -> Scene {
    Scene {
        viewport: Some(SceneViewport {
            width: 360.0,
            height: 320.0,
        }),
        charges: vec![
            SceneCharge {
                id: Some(1),
                x: 100.0,
                y: 150.0,
                q: 10.0,
            },
            SceneCharge {
                id: Some(2),
                x: 240.0,
                y: 150.0,
                q: -10.0,
            },
        ],
    }
}

pub fn run(args: InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(CliError::Argument(format!(
            "'{}' already exists; pass --force to overwrite it.",
            args.output.display()
        )));
    }

    info!("Writing example scene to {:?}", &args.output);
    example_scene()
        .save(&args.output)
        .map_err(EngineError::from)?;
    println!("✓ Example scene written to: {}", args.output.display());
    Ok(())
}
