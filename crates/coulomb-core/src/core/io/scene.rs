use crate::core::models::charge::Charge;
use crate::core::models::ids::ChargeId;
use crate::core::models::store::{ChargeStore, StoreError, StoreSettings};
use crate::core::sampling::grid::Viewport;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while reading, writing or interpreting a scene file.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The scene file could not be read or written.
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene text is not valid TOML or does not match the scene layout.
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize scene: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The charges do not form a valid store (duplicate ids, too many charges).
    #[error("Invalid scene: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneViewport {
    pub width: f64,
    pub height: f64,
}

impl From<SceneViewport> for Viewport {
    fn from(v: SceneViewport) -> Self {
        Viewport::new(v.width, v.height)
    }
}

impl From<Viewport> for SceneViewport {
    fn from(v: Viewport) -> Self {
        Self {
            width: v.width,
            height: v.height,
        }
    }
}

/// One charge entry. `q` is in nanocoulombs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneCharge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub x: f64,
    pub y: f64,
    pub q: f64,
}

/// A lab setup: an optional viewport and the charges placed in it.
///
/// ```toml
/// [viewport]
/// width = 360.0
/// height = 320.0
///
/// [[charges]]
/// x = 100.0
/// y = 150.0
/// q = 10.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<SceneViewport>,
    #[serde(default)]
    pub charges: Vec<SceneCharge>,
}

impl Scene {
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_toml_str(&content)?;
        debug!(charges = scene.charges.len(), "Loaded scene.");
        Ok(scene)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport.map(Viewport::from)
    }

    /// Captures the current contents of a store.
    pub fn from_store(store: &ChargeStore, viewport: Option<Viewport>) -> Self {
        Self {
            viewport: viewport.map(SceneViewport::from),
            charges: store
                .iter()
                .map(|c| SceneCharge {
                    id: Some(c.id.get()),
                    x: c.position.x,
                    y: c.position.y,
                    q: c.magnitude,
                })
                .collect(),
        }
    }

    /// Builds a store holding the scene's charges in file order.
    ///
    /// Entries without an explicit id are numbered after the largest explicit one.
    pub fn into_store(self, settings: StoreSettings) -> Result<ChargeStore, SceneError> {
        let mut next_id = match self.charges.iter().filter_map(|c| c.id).max() {
            Some(last) => last
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted(ChargeId(last)))?,
            None => 1,
        };

        let mut charges = Vec::with_capacity(self.charges.len());
        for c in self.charges {
            let id = match c.id {
                Some(id) => id,
                None => {
                    let assigned = next_id;
                    next_id = assigned
                        .checked_add(1)
                        .ok_or(StoreError::IdSpaceExhausted(ChargeId(assigned)))?;
                    assigned
                }
            };
            charges.push(Charge::new(ChargeId(id), Point2::new(c.x, c.y), c.q));
        }

        Ok(ChargeStore::from_charges(settings, charges)?)
    }
}
