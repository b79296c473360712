use coulomblab::core::models::store::{
    DEFAULT_CAPACITY, DEFAULT_MAGNITUDE_NC, DEFAULT_MARKER_SIZE, DEFAULT_POSITION,
};
use nalgebra::Point2;
use coulomblab::core::sampling::overlay::{
    POTENTIAL_NORMALIZATION, SCALAR_STEP, VECTOR_SCALE, VECTOR_STEP,
};

/// Values used for any key left out of both the config file and the command line.
pub struct DefaultsConfig {
    pub capacity: usize,
    pub default_magnitude: f64,
    pub default_position: Point2<f64>,
    pub marker_size: f64,
    pub vector_step: f64,
    pub vector_scale: f64,
    pub scalar_step: f64,
    pub potential_normalization: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_magnitude: DEFAULT_MAGNITUDE_NC,
            default_position: Point2::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1),
            marker_size: DEFAULT_MARKER_SIZE,
            vector_step: VECTOR_STEP,
            vector_scale: VECTOR_SCALE,
            scalar_step: SCALAR_STEP,
            potential_normalization: POTENTIAL_NORMALIZATION,
        }
    }
}
