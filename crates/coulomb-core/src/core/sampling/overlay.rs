use super::grid::GridSpec;
use crate::core::models::charge::Charge;
use crate::core::physics::electrostatics::{field_at, potential_at};
use nalgebra::{Point2, Vector2};
use std::fmt;
use std::str::FromStr;

/// Grid step of the electric field overlay.
pub const VECTOR_STEP: f64 = 30.0;
/// Length multiplier from field strength to drawn segment. A display constant, not a unit
/// conversion.
pub const VECTOR_SCALE: f64 = 200.0;
/// Grid step of the potential heatmap.
pub const SCALAR_STEP: f64 = 12.0;
/// Potential magnitude that maps to full opacity.
pub const POTENTIAL_NORMALIZATION: f64 = 10.0;

/// Stroke width of field segments.
pub const FIELD_STROKE_WIDTH: f64 = 5.0;
pub const FIELD_HUE: Rgb = Rgb::new(0, 255, 255);
pub const POTENTIAL_HUE: Rgb = Rgb::new(255, 255, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Which overlay to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayMode {
    /// Electric field drawn as directed segments.
    Vector,
    /// Electric potential drawn as translucent cells.
    Scalar,
}

impl OverlayMode {
    pub fn default_step(self) -> f64 {
        match self {
            OverlayMode::Vector => VECTOR_STEP,
            OverlayMode::Scalar => SCALAR_STEP,
        }
    }

    pub fn hue(self) -> Rgb {
        match self {
            OverlayMode::Vector => FIELD_HUE,
            OverlayMode::Scalar => POTENTIAL_HUE,
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayMode::Vector => f.write_str("vector"),
            OverlayMode::Scalar => f.write_str("potential"),
        }
    }
}

impl FromStr for OverlayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vector" | "field" | "electric" => Ok(OverlayMode::Vector),
            "scalar" | "potential" => Ok(OverlayMode::Scalar),
            other => Err(format!(
                "unknown overlay mode '{}', expected 'vector' or 'potential'",
                other
            )),
        }
    }
}

/// A directed segment from a grid point along the local field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSegment {
    pub origin: Point2<f64>,
    /// `origin + field * scale`.
    pub tip: Point2<f64>,
    pub field: Vector2<f64>,
}

/// A square heatmap cell anchored at its top-left grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialCell {
    pub origin: Point2<f64>,
    pub size: f64,
    pub potential: f64,
    /// Opacity in `[0, 1]`.
    pub intensity: f64,
}

/// Linear clamp of `|V| / normalization` to at most 1.
#[inline]
pub fn potential_intensity(potential: f64, normalization: f64) -> f64 {
    (potential.abs() / normalization).min(1.0)
}

/// Samples the electric field of a charge snapshot over a grid.
#[derive(Debug, Clone, Copy)]
pub struct VectorFieldSampler<'a> {
    charges: &'a [Charge],
    grid: GridSpec,
    scale: f64,
}

impl<'a> VectorFieldSampler<'a> {
    pub fn new(charges: &'a [Charge], grid: GridSpec, scale: f64) -> Self {
        Self {
            charges,
            grid,
            scale,
        }
    }

    #[inline]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Lazily evaluates one segment per grid point. Each call restarts the traversal.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = FieldSegment> + Clone {
        let charges = self.charges;
        let scale = self.scale;
        self.grid.points().map(move |origin| {
            let field = field_at(&origin, charges);
            FieldSegment {
                origin,
                tip: origin + field * scale,
                field,
            }
        })
    }
}

/// Samples the electric potential of a charge snapshot over a grid.
#[derive(Debug, Clone, Copy)]
pub struct PotentialSampler<'a> {
    charges: &'a [Charge],
    grid: GridSpec,
    normalization: f64,
}

impl<'a> PotentialSampler<'a> {
    pub fn new(charges: &'a [Charge], grid: GridSpec, normalization: f64) -> Self {
        Self {
            charges,
            grid,
            normalization,
        }
    }

    #[inline]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Lazily evaluates one cell per grid point. Each call restarts the traversal.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = PotentialCell> + Clone {
        let charges = self.charges;
        let size = self.grid.step();
        let normalization = self.normalization;
        self.grid.points().map(move |origin| {
            let potential = potential_at(&origin, charges);
            PotentialCell {
                origin,
                size,
                potential,
                intensity: potential_intensity(potential, normalization),
            }
        })
    }
}
