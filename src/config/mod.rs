//! Configuration module for insta-scraper.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration and handle validation

pub mod loader;
pub mod validation;

pub use loader::{Config, OptionsConfig, SessionConfig};
pub use validation::{validate_config, validate_handle};
