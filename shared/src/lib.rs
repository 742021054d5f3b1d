//! Shared types for the Weather News System
//!
//! This crate contains types shared between the backend and any other
//! components of the system: the API response envelope, field validation
//! rules, and the canonical seed data set.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
