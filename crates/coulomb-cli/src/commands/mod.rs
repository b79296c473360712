pub mod forces;
pub mod init;
pub mod inspect;
pub mod overlay;

use crate::error::Result;
use coulomblab::core::io::scene::Scene;
use coulomblab::core::models::store::ChargeStore;
use coulomblab::core::sampling::grid::Viewport;
use coulomblab::engine::config::LabConfig;
use coulomblab::engine::error::EngineError;
use std::path::Path;
use tracing::info;

/// A scene file turned into a live store.
pub struct LoadedScene {
    pub store: ChargeStore,
    pub viewport: Option<Viewport>,
}

pub fn load_scene(path: &Path, config: &LabConfig) -> Result<LoadedScene> {
    info!("Loading scene from {:?}", path);
    let scene = Scene::load(path).map_err(EngineError::from)?;
    let viewport = scene.viewport();
    let store = scene
        .into_store(config.store)
        .map_err(EngineError::from)?;
    info!(charges = store.len(), "Scene loaded.");
    Ok(LoadedScene { store, viewport })
}
