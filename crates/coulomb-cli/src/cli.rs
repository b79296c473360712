use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use coulomblab::core::sampling::overlay::OverlayMode;
use nalgebra::Point2;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Coulomb Lab Contributors",
    version,
    about = "Coulomb Lab CLI - Inspect point-charge scenes: net forces, field and potential readings, and overlay sampling.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the net Coulomb force on every charge of a scene.
    Forces(ForcesArgs),
    /// Evaluate the electric field and potential at chosen points.
    Inspect(InspectArgs),
    /// Sample the field-vector or potential overlay over the viewport and export it as CSV.
    Overlay(OverlayArgs),
    /// Write an example scene file to start from.
    Init(InitArgs),
}

/// Configuration sources shared by every command that loads a scene.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to an optional lab configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S overlay.vector-step=20
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `forces` subcommand.
#[derive(Args, Debug)]
pub struct ForcesArgs {
    /// Path to the scene file (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scene: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write the force table as CSV instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the scene file (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scene: PathBuf,

    /// Point to inspect, as `X,Y`. Can be used multiple times.
    #[arg(long = "at", required = true, value_name = "X,Y", value_parser = parser::parse_point)]
    pub points: Vec<Point2<f64>>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `overlay` subcommand.
#[derive(Args, Debug)]
pub struct OverlayArgs {
    /// Path to the scene file (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scene: PathBuf,

    /// Which overlay to sample: `vector` (field arrows) or `potential` (shaded cells).
    #[arg(short, long, default_value = "vector", value_name = "MODE")]
    pub mode: OverlayMode,

    /// Override the grid step for the selected mode.
    #[arg(long, value_name = "FLOAT")]
    pub step: Option<f64>,

    /// Override the viewport width from the scene file.
    #[arg(long, value_name = "FLOAT")]
    pub width: Option<f64>,

    /// Override the viewport height from the scene file.
    #[arg(long, value_name = "FLOAT")]
    pub height: Option<f64>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Path for the CSV file receiving the samples.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the example scene.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
