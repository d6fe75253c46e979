use crate::models::{Checklist, CycleResult};
use crate::services::engine::{CheckEvent, CycleEngine};
use crate::services::report::ReportSink;
use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;

/// Everything produced by one pass over a log.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub events: Vec<CheckEvent>,
    pub report: ReportSink,
    pub results: Vec<CycleResult>,
}

/// Drives a [`CycleEngine`] over a whole log and collects the report.
pub struct LogChecker<'a> {
    checklist: &'a Checklist,
}

impl<'a> LogChecker<'a> {
    pub fn new(checklist: &'a Checklist) -> Self {
        Self { checklist }
    }

    /// Read a log file (lossy decoding) and check every line.
    pub fn run_file(&self, log_path: &Utf8Path) -> Result<CheckOutcome> {
        let bytes = fs::read(log_path)
            .with_context(|| format!("Failed to read log file: {}", log_path))?;
        let content = String::from_utf8_lossy(&bytes);

        tracing::info!(
            "Checking {} against {} checklist items",
            log_path,
            self.checklist.len()
        );
        Ok(self.run_lines(content.lines()))
    }

    /// Check lines in order, then close any open cycle.
    pub fn run_lines<'l, I>(&self, lines: I) -> CheckOutcome
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut engine = CycleEngine::new(self.checklist);
        let mut events = Vec::new();

        for (idx, line) in lines.into_iter().enumerate() {
            events.extend(engine.process_line(idx + 1, line));
        }
        events.extend(engine.finish());

        let mut report = ReportSink::new();
        report.record_all(self.checklist, &events);

        tracing::info!(
            "Log check finished: {} events, {} cycles",
            events.len(),
            engine.cycle_count()
        );

        CheckOutcome {
            events,
            report,
            results: engine.results().to_vec(),
        }
    }
}
