//! Services module - checklist validation of cyclic logs.
//!
//! The services are framework-agnostic: no CLI or printing, only the
//! loading, matching and reporting logic, so each piece is testable on its own.
//!
//! # Components
//!
//! - [`ChecklistLoader`]: parses six-column checklist definitions into a
//!   [`Checklist`](crate::models::Checklist), collecting [`ChecklistWarning`]s
//!   instead of failing
//! - [`TimestampExtractor`]: recognizes the optional `[YYYY.MM.DD-HH.MM.SS:mmm]`
//!   line prefix
//! - [`CycleEngine`]: the matching state machine; emits [`CheckEvent`]s
//! - [`ReportSink`]: turns events into the report transcript
//! - [`LogChecker`]: runs the engine over a whole log
//! - [`splitter`]: cuts raw logs into parts at keyword lines
//!
//! # Usage Example
//!
//! ```ignore
//! use logcheck::services::{ChecklistLoader, LogChecker};
//!
//! let loaded = ChecklistLoader::default().load_file("boot.chk".into())?;
//! let outcome = LogChecker::new(&loaded.checklist).run_file("device.log".into())?;
//! println!("{}", outcome.report.render());
//! ```

pub mod check;
pub mod engine;
pub mod loader;
pub mod report;
pub mod splitter;
pub mod timestamp;

pub use check::{CheckOutcome, LogChecker};
pub use engine::{CheckEvent, CycleEngine, FailReason};
pub use loader::{ChecklistLoader, ChecklistWarning, LoadOutcome};
pub use report::{ReportSink, default_report_path};
pub use splitter::{SplitError, SplitSummary, load_keywords, split_log_file};
pub use timestamp::TimestampExtractor;
