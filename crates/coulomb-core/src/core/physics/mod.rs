//! # Physics Module
//!
//! Coulomb's law by direct pairwise superposition over a snapshot of charges.
//!
//! ## Key Components
//!
//! - [`constants`] - Coulomb constant and the nanocoulomb conversion factor
//! - [`electrostatics`] - `potential_at`, `field_at` and `forces_on_all`
//! - [`force`] - The per-charge [`force::ForceResult`] readout
//!
//! Every operation recomputes from the charges it is given. A charge whose distance
//! to the evaluation point is exactly zero is skipped; no epsilon is added anywhere,
//! so results match the closed-form sums exactly.
//!
//! ```ignore
//! use coulomblab::core::physics::electrostatics::{field_at, forces_on_all};
//!
//! let field = field_at(&Point2::new(30.0, 60.0), store.snapshot());
//! let forces = forces_on_all(store.snapshot());
//! ```

pub mod constants;
pub mod electrostatics;
pub mod force;
pub(crate) mod potentials;
