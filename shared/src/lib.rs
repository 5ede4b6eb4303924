//! Shared types and models for the Vehicle Maintenance platform
//!
//! This crate contains the data the due-status engine consumes and produces,
//! shared between the engine, the command-line driver and the app (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
