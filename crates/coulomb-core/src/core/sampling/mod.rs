//! # Sampling Module
//!
//! Discretizes the electric field and potential over a rectangular viewport for
//! visualization.
//!
//! - [`grid`] - Viewport bounds and the lazy, restartable grid traversal
//! - [`overlay`] - Vector (field) and scalar (potential) samples built on the grid
//!
//! Traversal is column-major: increasing x in the outer loop, increasing y in the inner
//! loop. Coordinates start at zero and advance by whole steps while they stay strictly
//! inside the viewport; the last partial cell at each edge is included, nothing beyond.

pub mod grid;
pub mod overlay;
