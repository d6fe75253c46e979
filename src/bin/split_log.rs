//! split-log - cut a raw log into parts at keyword lines
//!
//! `split-log <INPUT> <KEYWORDS> [OUTPUT_DIR]`, where KEYWORDS is either a
//! file with one keyword per line or a comma-separated list.

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use logcheck::ConfigManager;
use logcheck::services::{load_keywords, split_log_file};

#[derive(Parser, Debug)]
#[command(
    name = "split-log",
    version,
    about = "Split a log file into parts at keyword lines"
)]
struct Cli {
    /// Log file to split
    input: Utf8PathBuf,

    /// Keyword file (one per line) or comma-separated keywords
    keywords: String,

    /// Output directory (default: split_output_dir setting)
    output_dir: Option<Utf8PathBuf>,

    /// Directory containing logcheck.yaml
    #[arg(long, default_value = ".")]
    config_dir: Utf8PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = ConfigManager::new(&cli.config_dir).load_settings()?;
    let _guard = logcheck::logging::setup_logging_with_console(
        &settings.log_dir,
        "split-log",
        settings.debug_mode,
        settings.console_log,
    )?;

    let keywords = load_keywords(&cli.keywords)?;

    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| Utf8PathBuf::from(settings.split_output_dir.clone()));

    let summary = split_log_file(&cli.input, &keywords, &output_dir)?;
    for (path, lines) in &summary.parts {
        println!("[created] {} ({} lines)", path, lines);
    }
    println!(
        "\n[done] {} parts written to {}",
        summary.parts.len(),
        output_dir
    );
    Ok(())
}
