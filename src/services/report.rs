use crate::models::{Checklist, CycleResult};
use crate::services::engine::{CheckEvent, FailReason};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Accumulates engine events into the report transcript.
///
/// The transcript interleaves OK/Fail lines with cycle markers and ends with
/// an all-cycles table once [`render`](Self::render) is called.
#[derive(Debug, Clone, Default)]
pub struct ReportSink {
    lines: Vec<String>,
    cycles: Vec<CycleResult>,
}

impl ReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the report text for one event.
    pub fn record(&mut self, checklist: &Checklist, event: &CheckEvent) {
        match event {
            CheckEvent::Ok {
                index,
                pattern,
                line_no,
                line,
            } => {
                let item = &checklist[*index];
                self.lines
                    .push(format!("{}: {}, match=[{}]", item.label, item.ok_text, pattern));
                self.lines.push(format!("  >> (Line {}) {}", line_no, line));
            }
            CheckEvent::Fail { index, reason } => {
                let item = &checklist[*index];
                // Items without fail text still count, they just stay quiet
                if item.fail_text.is_empty() {
                    return;
                }
                let detail = match reason {
                    FailReason::Skipped { .. } => {
                        format!("skipped, patterns=[{}]", item.pattern_sources().join(", "))
                    }
                    FailReason::UnexpectedMatch { .. } => {
                        format!(
                            "unexpected match, not_patterns=[{}]",
                            item.not_pattern_sources().join(", ")
                        )
                    }
                    FailReason::MissingAtEndOfLog => {
                        format!(
                            "not found in last cycle, patterns=[{}]",
                            item.pattern_sources().join(", ")
                        )
                    }
                };
                self.lines
                    .push(format!("{}: {} ({})", item.label, item.fail_text, detail));
                if let FailReason::UnexpectedMatch { line_no, line, .. } = reason {
                    self.lines.push(format!("  >> (Line {}) {}", line_no, line));
                }
            }
            CheckEvent::CycleComplete(summary) => {
                let result = summary.result;
                self.lines.push(format!(
                    "\n=== No# {} Checklist cycle complete (Ok: {}, Fail: {}) | Total Time : {} (Sec) [{}] ===\n",
                    result.number,
                    result.ok_count,
                    result.fail_count,
                    summary.elapsed_display(),
                    summary.trigger
                ));
                self.cycles.push(result);
            }
        }
    }

    pub fn record_all<'e, I>(&mut self, checklist: &Checklist, events: I)
    where
        I: IntoIterator<Item = &'e CheckEvent>,
    {
        for event in events {
            self.record(checklist, event);
        }
    }

    /// Event lines recorded so far, without the summary table.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cycles(&self) -> &[CycleResult] {
        &self.cycles
    }

    /// Full transcript followed by the all-cycles table.
    pub fn render(&self) -> String {
        let summary = std::iter::once("=== All Cycles Summary ===".to_string()).chain(
            self.cycles.iter().map(|c| {
                format!("No# {}: Ok={}, Fail={}", c.number, c.ok_count, c.fail_count)
            }),
        );

        self.lines
            .iter()
            .cloned()
            .chain(summary)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the rendered report, creating the parent directory on demand.
    pub fn write_to(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory: {}", parent))?;
        }

        fs::write(path, self.render())
            .with_context(|| format!("Failed to write report: {}", path))?;

        tracing::info!("Report saved to {}", path);
        Ok(())
    }
}

/// `<results_dir>/<prefix><log file stem>.txt`
pub fn default_report_path(
    results_dir: &Utf8Path,
    prefix: &str,
    log_path: &Utf8Path,
) -> Utf8PathBuf {
    let stem = log_path.file_stem().unwrap_or("log");
    results_dir.join(format!("{}{}.txt", prefix, stem))
}
