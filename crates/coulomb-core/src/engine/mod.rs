//! # Engine Module
//!
//! Shared machinery for the workflows and the front ends built on them.
//!
//! - **Configuration** ([`config`]) - Store limits and overlay constants, built and
//!   validated through [`config::LabConfigBuilder`]
//! - **Error Handling** ([`error`]) - [`error::EngineError`], wrapping the edge errors of
//!   the core modules
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for long
//!   sampling runs

pub mod config;
pub mod error;
pub mod progress;
