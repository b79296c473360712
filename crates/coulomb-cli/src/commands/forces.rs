use super::load_scene;
use crate::cli::ForcesArgs;
use crate::config::PartialLabConfig;
use crate::error::Result;
use coulomblab::core::io::export;
use coulomblab::engine::error::EngineError;
use coulomblab::workflows::measure::{self, Measurement};
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn run(args: ForcesArgs) -> Result<()> {
    let config = PartialLabConfig::load(args.config.config.as_deref())?
        .merge_with_cli(&args.config, None)?;
    let lab = load_scene(&args.scene, &config)?;

    let rows = measure::measure(
        lab.store.snapshot(),
        lab.viewport.as_ref(),
        config.store.marker_size,
    );

    match &args.output {
        Some(path) => {
            info!("Writing force table to {:?}", path);
            let written = export::write_measurements(BufWriter::new(File::create(path)?), &rows)
                .map_err(EngineError::from)?;
            println!("✓ {} force row(s) written to: {}", written, path.display());
        }
        None => print!("{}", render_table(&rows)),
    }
    Ok(())
}

/// One line per charge, forces in newtons with two decimals of exponent notation.
fn render_table(rows: &[Measurement]) -> String {
    if rows.is_empty() {
        return "No charges in scene.\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "Charge {} ({}{} nC) at ({}, {}): Fx = {:.2e} N, Fy = {:.2e} N, |F| = {:.2e} N",
            row.label,
            row.polarity,
            row.magnitude_nc.abs(),
            row.display_x,
            row.display_y,
            row.fx,
            row.fy,
            row.force,
        );
    }
    out
}
