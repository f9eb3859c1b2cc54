//! Shared types and models for the vineyard environment simulator
//!
//! This crate contains the data model exchanged between the simulator engine,
//! the WASM bindings and any presentation layer consuming them.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
