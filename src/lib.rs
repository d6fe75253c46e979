// logcheck - Validate cyclic log streams against an ordered checklist
//
// This is the library crate containing the checklist model, the matching
// engine and report building. The binaries (main.rs, bin/split_log.rs)
// provide the command-line entry points.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{Checklist, ChecklistItem, CycleResult, Settings};
pub use services::{CheckEvent, ChecklistLoader, CycleEngine, LogChecker, ReportSink};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
