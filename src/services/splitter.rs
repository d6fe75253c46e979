//! Keyword-based log splitting.
//!
//! Partitions a raw log into numbered part files, starting a new part at each
//! line containing one of the keywords. Consecutive keyword lines stay in the
//! same part. This has no data dependency on the checklist engine; it is used
//! to cut long captures into per-run logs before checking them.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Input file not found: {0}")]
    InputNotFound(Utf8PathBuf),

    #[error("Keyword list is empty")]
    NoKeywords,
}

/// Files written by a split, in order, with their line counts.
#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    pub parts: Vec<(Utf8PathBuf, usize)>,
}

/// Keywords from a file (one per line) when `arg` names an existing file,
/// otherwise from a comma-separated list.
pub fn load_keywords(arg: &str) -> Result<Vec<String>> {
    let path = Utf8Path::new(arg);
    if path.is_file() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword file: {}", path))?;
        let keywords: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
        tracing::info!("Loaded {} keywords from {}", keywords.len(), path);
        return Ok(keywords);
    }

    Ok(arg
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect())
}

/// Split `input` at keyword lines into `<output_dir>/<stem>_part_NNN.log`.
pub fn split_log_file(
    input: &Utf8Path,
    keywords: &[String],
    output_dir: &Utf8Path,
) -> Result<SplitSummary> {
    if !input.is_file() {
        return Err(SplitError::InputNotFound(input.to_path_buf()).into());
    }
    if keywords.is_empty() {
        return Err(SplitError::NoKeywords.into());
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let bytes = fs::read(input).with_context(|| format!("Failed to read log file: {}", input))?;
    let content = String::from_utf8_lossy(&bytes);
    let stem = input.file_stem().unwrap_or("log");

    let mut summary = SplitSummary::default();
    let mut buffer: Vec<&str> = Vec::new();
    let mut last_was_keyword = false;

    for line in content.split_inclusive('\n') {
        if keywords.iter().any(|k| line.contains(k.as_str())) {
            if !buffer.is_empty() && !last_was_keyword {
                write_part(output_dir, stem, &buffer, &mut summary)?;
                buffer.clear();
            }
            last_was_keyword = true;
        } else {
            last_was_keyword = false;
        }
        buffer.push(line);
    }

    if !buffer.is_empty() {
        write_part(output_dir, stem, &buffer, &mut summary)?;
    }

    tracing::info!(
        "Split {} into {} parts in {}",
        input,
        summary.parts.len(),
        output_dir
    );
    Ok(summary)
}

fn write_part(
    output_dir: &Utf8Path,
    stem: &str,
    lines: &[&str],
    summary: &mut SplitSummary,
) -> Result<()> {
    let path = output_dir.join(format!("{}_part_{:03}.log", stem, summary.parts.len()));
    fs::write(&path, lines.concat()).with_context(|| format!("Failed to write part: {}", path))?;

    tracing::debug!("Wrote {} ({} lines)", path, lines.len());
    summary.parts.push((path, lines.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_keywords() {
        let keywords = load_keywords("ERROR, WARN,,CRITICAL ").unwrap();
        assert_eq!(keywords, vec!["ERROR", "WARN", "CRITICAL"]);
    }

    #[test]
    fn test_empty_keyword_argument() {
        assert!(load_keywords(" , ").unwrap().is_empty());
    }
}
