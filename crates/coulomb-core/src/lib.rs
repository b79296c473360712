//! # Coulomb Lab Core Library
//!
//! Electrostatics for small sets of point charges in a 2D plane: net Coulomb forces,
//! electric field and potential evaluation, and grid sampling for visual overlays.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that every piece can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Charge models and the bounded `ChargeStore`, the pure
//!   physics functions (`potential_at`, `field_at`, `forces_on_all`), the lazy grid
//!   sampler, and scene/export I/O.
//!
//! - **[`engine`]: Shared Machinery.** Validated configuration, error types and progress
//!   reporting used by the workflows and front ends.
//!
//! - **[`workflows`]: The Public API.** Per-frame orchestration: a store snapshot goes in,
//!   force readouts and overlay samples come out. Nothing is cached between frames.

pub mod core;
pub mod engine;
pub mod workflows;
