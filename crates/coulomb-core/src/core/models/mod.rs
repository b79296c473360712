//! # Core Models Module
//!
//! Data structures describing the user-editable set of point charges.
//!
//! ## Key Components
//!
//! - [`ids`] - Stable identifiers for charges
//! - [`charge`] - A single point charge with position and signed magnitude
//! - [`store`] - The ordered, bounded collection mutated by user interaction
//!
//! ## Usage
//!
//! ```ignore
//! use coulomblab::core::models::store::ChargeStore;
//! use nalgebra::Point2;
//!
//! let mut store = ChargeStore::new();
//! let id = store.add().expect("store is empty");
//! store.move_to(id, Point2::new(40.0, 80.0))?;
//! store.toggle_polarity(id)?;
//! ```

pub mod charge;
pub mod ids;
pub mod store;
