use serde::{Deserialize, Serialize};

/// Runtime settings from `logcheck.yaml` and `LOGCHECK_*` environment variables.
///
/// Every field has a default, so a missing or partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory for reports when no explicit output path is given
    pub results_dir: String,

    /// Prefix of derived report file names (`<prefix><log stem>.txt`)
    pub report_prefix: String,

    /// Checklist lines starting with this are skipped
    pub comment_prefix: String,

    pub log_dir: String,
    pub log_prefix: String,
    pub debug_mode: bool,

    /// Mirror diagnostics to stderr
    pub console_log: bool,

    /// Default output directory of `split-log`
    pub split_output_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_dir: "ND_Results".to_string(),
            report_prefix: "report_".to_string(),
            comment_prefix: "#".to_string(),
            log_dir: "logs".to_string(),
            log_prefix: "logcheck".to_string(),
            debug_mode: false,
            console_log: true,
            split_output_dir: "splitted_logs".to_string(),
        }
    }
}
