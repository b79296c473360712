use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::export::ExportError;
use crate::core::io::scene::SceneError;
use crate::core::sampling::grid::SamplingError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Sampling failed: {source}")]
    Sampling {
        #[from]
        source: SamplingError,
    },

    #[error("Scene error: {source}")]
    Scene {
        #[from]
        source: SceneError,
    },

    #[error("Export failed: {source}")]
    Export {
        #[from]
        source: ExportError,
    },
}
