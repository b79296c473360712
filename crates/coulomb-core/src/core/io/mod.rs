//! # I/O Module
//!
//! - [`scene`] - TOML scene files: a viewport and an ordered list of charges
//! - [`export`] - CSV export of force readouts and overlay samples
//!
//! Scene files are input descriptions for the front ends, not a history format; results
//! are only ever written out, never read back.

pub mod export;
pub mod scene;
