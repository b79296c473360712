use nalgebra::Point2;
use std::iter::FusedIterator;
use thiserror::Error;
use tracing::warn;

/// Upper bound on the samples taken along one axis.
pub const MAX_AXIS_STEPS: usize = u32::MAX as usize;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum SamplingError {
    #[error("Grid step must be positive and finite, got {0}")]
    InvalidStep(f64),
}

/// Size of the drawing surface the overlays cover.
///
/// A viewport whose width or height is not a positive finite number is treated as not
/// yet laid out: sampling over it produces nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Number of coordinates `i * step` with `i >= 0` that lie strictly below `extent`.
///
/// `None` when that number exceeds [`MAX_AXIS_STEPS`].
fn steps_within(extent: f64, step: f64) -> Option<usize> {
    if extent <= 0.0 || !extent.is_finite() {
        return Some(0);
    }
    let estimate = (extent / step).ceil();
    if !estimate.is_finite() || estimate > MAX_AXIS_STEPS as f64 {
        return None;
    }
    // Below 2^32 every count is exact as f64, so each loop runs at most a step or two.
    let mut count = estimate as usize;
    while count > 0 && (count - 1) as f64 * step >= extent {
        count -= 1;
    }
    while (count as f64) * step < extent {
        count += 1;
    }
    (count <= MAX_AXIS_STEPS).then_some(count)
}

/// A viewport paired with a fixed sampling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    viewport: Viewport,
    step: f64,
    columns: usize,
    rows: usize,
}

impl GridSpec {
    pub fn new(viewport: Viewport, step: f64) -> Result<Self, SamplingError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(SamplingError::InvalidStep(step));
        }
        let (columns, rows) = if viewport.is_known() {
            match (
                steps_within(viewport.width, step),
                steps_within(viewport.height, step),
            ) {
                (Some(columns), Some(rows)) if columns.checked_mul(rows).is_some() => {
                    (columns, rows)
                }
                _ => {
                    warn!(
                        width = viewport.width,
                        height = viewport.height,
                        step,
                        "Grid is too large to sample; treating it as empty."
                    );
                    (0, 0)
                }
            }
        } else {
            (0, 0)
        };
        Ok(Self {
            viewport,
            step,
            columns,
            rows,
        })
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Distinct x coordinates visited.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Distinct y coordinates visited.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sample points. The product was checked in [`GridSpec::new`].
    #[inline]
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a fresh traversal of the grid.
    pub fn points(&self) -> GridPoints {
        GridPoints {
            step: self.step,
            rows: self.rows,
            index: 0,
            total: self.len(),
        }
    }
}

impl IntoIterator for &GridSpec {
    type Item = Point2<f64>;
    type IntoIter = GridPoints;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Lazy iterator over the sample points of a [`GridSpec`].
#[derive(Debug, Clone)]
pub struct GridPoints {
    step: f64,
    rows: usize,
    index: usize,
    total: usize,
}

impl Iterator for GridPoints {
    type Item = Point2<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let column = self.index / self.rows;
        let row = self.index % self.rows;
        self.index += 1;
        Some(Point2::new(
            column as f64 * self.step,
            row as f64 * self.step,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridPoints {}

impl FusedIterator for GridPoints {}
