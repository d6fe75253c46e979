use crate::models::{Checklist, ChecklistItem};
use anyhow::{Context, Result};
use camino::Utf8Path;
use regex::Regex;
use std::fs;
use thiserror::Error;

/// Structural problems found while loading a checklist.
///
/// None of these abort loading; the affected line is skipped or the item
/// is kept in a degraded form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecklistWarning {
    #[error("line {line_no}: expected 6 columns, found {found}: {line}")]
    ColumnCount {
        line_no: usize,
        found: usize,
        line: String,
    },

    #[error("line {line_no}: invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        line_no: usize,
        pattern: String,
        reason: String,
    },

    #[error("line {line_no}: sub item '{label}' has no preceding main item and will never match")]
    OrphanSubItem { line_no: usize, label: String },

    #[error("line {line_no}: item '{label}' has no patterns and will never match")]
    NoPatterns { line_no: usize, label: String },
}

/// A loaded checklist plus everything that was wrong with its source.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub checklist: Checklist,
    pub warnings: Vec<ChecklistWarning>,
}

/// Parses six-column checklist definitions:
///
/// ```text
/// sub | label | ok text | fail text | not;patterns | patterns
/// ```
///
/// Blank lines, lines without `|` and comment lines are skipped silently.
#[derive(Debug, Clone)]
pub struct ChecklistLoader {
    comment_prefix: String,
}

impl ChecklistLoader {
    pub fn new(comment_prefix: impl Into<String>) -> Self {
        Self {
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Read and parse a checklist file.
    ///
    /// Only I/O failures are errors; malformed content becomes warnings.
    pub fn load_file(&self, path: &Utf8Path) -> Result<LoadOutcome> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read checklist: {}", path))?;
        let content = String::from_utf8_lossy(&bytes);

        let outcome = self.parse_lines(content.lines());
        tracing::info!(
            "Loaded checklist from {}: {} items, {} warnings",
            path,
            outcome.checklist.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    /// Parse checklist lines in order.
    pub fn parse_lines<'a, I>(&self, lines: I) -> LoadOutcome
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut items: Vec<ChecklistItem> = Vec::new();
        let mut warnings = Vec::new();
        let mut last_main: Option<usize> = None;

        for (idx, raw) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if self.is_skipped(line) {
                continue;
            }

            let mut item = match self.parse_item(line_no, line) {
                Ok(item) => item,
                Err(warning) => {
                    tracing::warn!("Checklist {}", warning);
                    warnings.push(warning);
                    continue;
                }
            };

            if item.patterns.is_empty() {
                let warning = ChecklistWarning::NoPatterns {
                    line_no,
                    label: item.label.clone(),
                };
                tracing::warn!("Checklist {}", warning);
                warnings.push(warning);
            }

            if item.is_sub {
                item.parent = last_main;
                if last_main.is_none() {
                    let warning = ChecklistWarning::OrphanSubItem {
                        line_no,
                        label: item.label.clone(),
                    };
                    tracing::warn!("Checklist {}", warning);
                    warnings.push(warning);
                }
            } else {
                last_main = Some(items.len());
            }

            tracing::debug!(
                "Checklist item {}: '{}' (sub={}, parent={:?})",
                items.len(),
                item.label,
                item.is_sub,
                item.parent
            );
            items.push(item);
        }

        LoadOutcome {
            checklist: Checklist::from_items(items),
            warnings,
        }
    }

    fn is_skipped(&self, line: &str) -> bool {
        line.is_empty()
            || !line.contains('|')
            || (!self.comment_prefix.is_empty() && line.starts_with(&self.comment_prefix))
    }

    fn parse_item(&self, line_no: usize, line: &str) -> Result<ChecklistItem, ChecklistWarning> {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        let [sub_flag, label, ok_text, fail_text, not_patterns, patterns] = parts[..] else {
            return Err(ChecklistWarning::ColumnCount {
                line_no,
                found: parts.len(),
                line: line.to_string(),
            });
        };

        Ok(ChecklistItem {
            label: label.to_string(),
            ok_text: ok_text.to_string(),
            fail_text: fail_text.to_string(),
            patterns: compile_patterns(line_no, patterns)?,
            not_patterns: compile_patterns(line_no, not_patterns)?,
            is_sub: is_truthy(sub_flag),
            parent: None,
        })
    }
}

impl Default for ChecklistLoader {
    fn default() -> Self {
        Self::new("#")
    }
}

/// `1`, `y`, `yes`, `true` in any case.
pub fn is_truthy(flag: &str) -> bool {
    matches!(flag.to_lowercase().as_str(), "1" | "y" | "yes" | "true")
}

fn compile_patterns(line_no: usize, list: &str) -> Result<Vec<Regex>, ChecklistWarning> {
    list.split(';')
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            Regex::new(p).map_err(|e| ChecklistWarning::InvalidPattern {
                line_no,
                pattern: p.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
