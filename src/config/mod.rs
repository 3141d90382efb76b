//! Configuration module for Article Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys take their built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use article_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Pages are written to: {}", config.database.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DatabaseConfig, DefaultsConfig, HttpConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
