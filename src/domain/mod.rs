//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod metrics;
pub mod summary;
pub mod assets;
pub mod analysis;
pub mod config_validation;
pub mod error;
