//! # Core Module
//!
//! The stateless foundation of Coulomb Lab.
//!
//! - **Charge Representation** ([`models`]) - Charges, identifiers and the bounded store
//! - **Electrostatics** ([`physics`]) - Coulomb force, field and potential by direct superposition
//! - **Discretization** ([`sampling`]) - Grid traversal and overlay samples for a viewport
//! - **File I/O** ([`io`]) - TOML scene files and CSV export of results
//!
//! Every function in [`physics`] and [`sampling`] is total over finite input: the only
//! singularity, a field point coinciding with a charge, is handled by skipping that
//! charge's contribution rather than by softening the potential.

pub mod io;
pub mod models;
pub mod physics;
pub mod sampling;
