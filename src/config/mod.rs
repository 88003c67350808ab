//! Monitor Configuration Module
//!
//! Per-deployment configuration loaded from TOML: batch limits and the
//! registry of predictive models with their feature wiring.
//!
//! ## Loading Order
//!
//! 1. `CONDITION_MONITOR_CONFIG` environment variable (path to TOML file)
//! 2. `monitor_config.toml` in the current working directory
//! 3. Built-in defaults (the production model set)
//!
//! ## Usage
//!
//! The config is loaded once at startup and handed to the pipeline
//! explicitly; there is no process-wide config singleton.
//!
//! ```ignore
//! let config = MonitorConfig::load();
//! let pipeline = Pipeline::from_config(&config);
//! ```

mod monitor_config;
pub mod defaults;
pub mod validation;

pub use monitor_config::*;
