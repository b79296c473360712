use crate::core::models::store::StoreSettings;
use crate::core::sampling::overlay::{
    OverlayMode, POTENTIAL_NORMALIZATION, SCALAR_STEP, VECTOR_SCALE, VECTOR_STEP,
};
use nalgebra::Point2;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{name}' must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("Parameter '{name}' must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("Store capacity must be at least 1")]
    ZeroCapacity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    pub vector_step: f64,
    pub vector_scale: f64,
    pub scalar_step: f64,
    pub potential_normalization: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            vector_step: VECTOR_STEP,
            vector_scale: VECTOR_SCALE,
            scalar_step: SCALAR_STEP,
            potential_normalization: POTENTIAL_NORMALIZATION,
        }
    }
}

impl OverlaySettings {
    pub fn step_for(&self, mode: OverlayMode) -> f64 {
        match mode {
            OverlayMode::Vector => self.vector_step,
            OverlayMode::Scalar => self.scalar_step,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabConfig {
    pub store: StoreSettings,
    pub overlay: OverlaySettings,
}

/// Builds a [`LabConfig`], falling back to the lab defaults for anything left unset.
#[derive(Default)]
pub struct LabConfigBuilder {
    capacity: Option<usize>,
    default_magnitude: Option<f64>,
    default_position: Option<Point2<f64>>,
    marker_size: Option<f64>,
    vector_step: Option<f64>,
    vector_scale: Option<f64>,
    scalar_step: Option<f64>,
    potential_normalization: Option<f64>,
}

impl LabConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
    pub fn default_magnitude(mut self, magnitude: f64) -> Self {
        self.default_magnitude = Some(magnitude);
        self
    }
    pub fn default_position(mut self, position: Point2<f64>) -> Self {
        self.default_position = Some(position);
        self
    }
    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = Some(size);
        self
    }
    pub fn vector_step(mut self, step: f64) -> Self {
        self.vector_step = Some(step);
        self
    }
    pub fn vector_scale(mut self, scale: f64) -> Self {
        self.vector_scale = Some(scale);
        self
    }
    pub fn scalar_step(mut self, step: f64) -> Self {
        self.scalar_step = Some(step);
        self
    }
    pub fn potential_normalization(mut self, normalization: f64) -> Self {
        self.potential_normalization = Some(normalization);
        self
    }

    pub fn build(self) -> Result<LabConfig, ConfigError> {
        let store_defaults = StoreSettings::default();
        let overlay_defaults = OverlaySettings::default();

        let capacity = self.capacity.unwrap_or(store_defaults.capacity);
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let default_position = self
            .default_position
            .unwrap_or(store_defaults.default_position);
        finite("default-position.x", default_position.x)?;
        finite("default-position.y", default_position.y)?;

        let store = StoreSettings {
            capacity,
            default_magnitude: finite(
                "default-magnitude",
                self.default_magnitude
                    .unwrap_or(store_defaults.default_magnitude),
            )?,
            default_position,
            marker_size: non_negative(
                "marker-size",
                self.marker_size.unwrap_or(store_defaults.marker_size),
            )?,
        };

        let overlay = OverlaySettings {
            vector_step: positive(
                "vector-step",
                self.vector_step.unwrap_or(overlay_defaults.vector_step),
            )?,
            vector_scale: positive(
                "vector-scale",
                self.vector_scale.unwrap_or(overlay_defaults.vector_scale),
            )?,
            scalar_step: positive(
                "scalar-step",
                self.scalar_step.unwrap_or(overlay_defaults.scalar_step),
            )?,
            potential_normalization: positive(
                "potential-normalization",
                self.potential_normalization
                    .unwrap_or(overlay_defaults.potential_normalization),
            )?,
        };

        Ok(LabConfig { store, overlay })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}
