//! Status subcommand implementation.
//!
//! Handles the `burpline status <scan-id>` command. Which artifacts are
//! fetched depends on the flag combination:
//!
//! - `--metrics --issues`: scan report first, then metrics
//! - `--metrics` alone: metrics only, the scan report is never fetched
//! - neither (or `--issues` alone): scan report only
//!
//! A failed inquiry is reported but does not abort the other inquiries of
//! the same invocation.

use std::path::PathBuf;

use clap::Parser;

use crate::api::ScannerApi;
use crate::error::{CliError, CliResult};
use crate::output;

/// Retrieve status, issues, and metrics for a submitted scan.
#[derive(Parser, Debug)]
pub struct StatusCommand {
    /// Identifier of a previously submitted scan
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// Fetch scan metrics
    #[arg(short = 'M', long)]
    pub metrics: bool,

    /// Fetch the scan report with its issues
    #[arg(short = 'I', long)]
    pub issues: bool,

    /// Export the retrieved issue set as JSON to this path
    #[arg(short = 'e', long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl StatusCommand {
    /// Execute the status command.
    pub async fn execute(&self, api: &dyn ScannerApi, quiet: bool) -> CliResult<()> {
        let mut failures: Vec<String> = Vec::new();

        if self.fetch_report() {
            match api.scan_report(&self.scan_id).await {
                Ok(report) => {
                    output::print_scan_report(&report);

                    if let Some(path) = &self.export {
                        output::export_issues(path, &report).map_err(|e| CliError::Io {
                            path: path.clone(),
                            reason: e.to_string(),
                        })?;
                        if !quiet {
                            output::print_success(&format!(
                                "exported issues to {}",
                                path.display()
                            ));
                        }
                    }
                }
                Err(e) => {
                    output::print_error(&format!("scan report for {}: {}", self.scan_id, e));
                    failures.push(e.to_string());
                }
            }
        }

        if self.metrics {
            match api.scan_metrics(&self.scan_id).await {
                Ok(metrics) => output::print_metrics(&metrics),
                Err(e) => {
                    output::print_error(&format!("metrics for {}: {}", self.scan_id, e));
                    failures.push(e.to_string());
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CliError::Inquiry(failures.join("; ")))
        }
    }

    /// Whether this flag combination includes the scan report.
    ///
    /// Metrics alone skips the report; any other combination fetches it,
    /// and always before metrics.
    fn fetch_report(&self) -> bool {
        !self.metrics || self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(metrics: bool, issues: bool) -> StatusCommand {
        StatusCommand {
            scan_id: "7".to_string(),
            metrics,
            issues,
            export: None,
        }
    }

    #[test]
    fn test_metrics_alone_skips_scan_report() {
        assert!(!command(true, false).fetch_report());
    }

    #[test]
    fn test_metrics_with_issues_fetches_scan_report_too() {
        assert!(command(true, true).fetch_report());
    }

    #[test]
    fn test_default_fetches_scan_report() {
        assert!(command(false, false).fetch_report());
        assert!(command(false, true).fetch_report());
    }
}
