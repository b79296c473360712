//! # Workflows Module
//!
//! High-level entry points that turn a snapshot of charges into everything a
//! presentation layer draws for one frame.
//!
//! - **Frame Workflow** ([`frame`]) - Forces plus whichever overlays are switched on
//! - **Overlay Workflow** ([`overlay`]) - Samples one overlay with progress reporting
//! - **Measurements** ([`measure`]) - The force readout in display coordinates
//!
//! Data flows one way: store snapshot in, derived results out. Nothing is cached, so
//! every call reflects the charges exactly as passed.

pub mod frame;
pub mod measure;
pub mod overlay;
