//! logcheck - checklist validation for cyclic logs
//!
//! Main entry point for the `logcheck` binary.
//!
//! # Execution Flow
//!
//! 1. Parse arguments: `<LOG> <CHECKLIST> [OUTPUT]`
//! 2. Load settings (`logcheck.yaml` + `LOGCHECK_*` environment)
//! 3. Initialize logging → `<log_dir>/<log_prefix>.<date>`
//! 4. Load the checklist (structural problems are logged as warnings)
//! 5. Run the cycle engine over the log
//! 6. Print the report and save it to OUTPUT or
//!    `<results_dir>/<report_prefix><log stem>.txt`
//!
//! Only I/O failures end the run with an error; checklist mismatches are
//! part of the report.

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use logcheck::services::default_report_path;
use logcheck::{APP_NAME, ChecklistLoader, ConfigManager, LogChecker, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "logcheck",
    version,
    about = "Validate a log against an ordered, cyclic checklist"
)]
struct Cli {
    /// Log file to check
    log: Utf8PathBuf,

    /// Checklist definition (six `|`-separated columns per line)
    checklist: Utf8PathBuf,

    /// Report destination (default: <results_dir>/<report_prefix><log stem>.txt)
    output: Option<Utf8PathBuf>,

    /// Directory containing logcheck.yaml
    #[arg(long, default_value = ".")]
    config_dir: Utf8PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Do not echo the report on stdout
    #[arg(long)]
    quiet: bool,

    /// Save the effective settings to logcheck.yaml
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir);
    let mut settings = config_manager.load_settings()?;
    settings.debug_mode |= cli.debug;

    let _guard = logcheck::logging::setup_logging_with_console(
        &settings.log_dir,
        &settings.log_prefix,
        settings.debug_mode,
        settings.console_log,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    if cli.write_config {
        config_manager.save_settings(&settings)?;
    }

    let loader = ChecklistLoader::new(settings.comment_prefix.as_str());
    let loaded = loader.load_file(&cli.checklist)?;
    if !loaded.warnings.is_empty() {
        tracing::warn!(
            "Checklist {} loaded with {} warnings",
            cli.checklist,
            loaded.warnings.len()
        );
    }

    let outcome = LogChecker::new(&loaded.checklist).run_file(&cli.log)?;

    let output = cli.output.unwrap_or_else(|| {
        default_report_path(
            Utf8Path::new(&settings.results_dir),
            &settings.report_prefix,
            &cli.log,
        )
    });

    if !cli.quiet {
        println!("{}", outcome.report.render());
    }
    outcome.report.write_to(&output)?;

    if !cli.quiet {
        println!("\n[INFO] Report saved to '{}'", output);
    }

    tracing::info!("Checked {} cycles from {}", outcome.results.len(), cli.log);
    Ok(())
}
