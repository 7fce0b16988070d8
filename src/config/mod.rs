//! Configuration loading and management for the People Analytics Engine.
//!
//! This module provides the strongly-typed threshold configuration used by
//! every analyzer, plus a loader that reads it from a YAML file. All
//! thresholds are overridable from the file without code changes; omitted
//! fields fall back to the documented defaults.
//!
//! # Example
//!
//! ```no_run
//! use people_analytics::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/analytics.yaml").unwrap();
//! println!("Burnout threshold: {} days", loader.config().leave.burnout_yearly_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnalyticsConfig, AttendanceThresholds, AttritionWeights, LeaveThresholds,
    PerformanceThresholds,
};
