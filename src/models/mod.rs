//! Data models for logcheck.
//!
//! - [`Checklist`] / [`ChecklistItem`]: the ordered item graph built at startup
//! - [`CycleResult`] / [`CycleSummary`]: per-cycle snapshots produced by the engine
//! - [`Settings`]: runtime settings loaded by [`ConfigManager`](crate::config::ConfigManager)
//!
//! Checklist models are immutable after load. All mutable run state lives in
//! [`CycleEngine`](crate::services::CycleEngine).

pub mod checklist;
pub mod config;
pub mod cycle;

pub use checklist::{Checklist, ChecklistItem};
pub use config::Settings;
pub use cycle::{CycleResult, CycleSummary, CycleTrigger};
