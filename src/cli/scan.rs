//! Scan subcommand implementation.
//!
//! Handles the `burpline scan` command: gathers targets from the supplied
//! sources and submits them sequentially. Each source carries its own
//! continuation policy: an nmap report batch and a single explicit target
//! are all-or-nothing, a host-list batch is best-effort.

use std::path::PathBuf;

use clap::Parser;

use crate::api::ScannerApi;
use crate::config::Credentials;
use crate::error::{CliError, CliResult};
use crate::orchestrator::submit_batch;
use crate::output;
use crate::targets::{parse_host_list, parse_nmap_report};

/// Submit targets for scanning.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Single target to scan (URL or host:port)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Nmap XML report to derive targets from
    #[arg(long = "nmap", value_name = "PATH")]
    pub nmap_report: Option<PathBuf>,

    /// Flat file with one target per line
    #[arg(long = "list", value_name = "PATH")]
    pub host_list: Option<PathBuf>,

    /// Username for an authenticated scan
    #[arg(short = 'U', long)]
    pub username: Option<String>,

    /// Password for an authenticated scan
    #[arg(short = 'P', long)]
    pub password: Option<String>,
}

impl ScanCommand {
    /// Execute the scan command.
    ///
    /// Sources are processed in order: nmap report, host list, single
    /// target. A fatal batch failure stops everything, including sources
    /// not yet processed.
    pub async fn execute(&self, api: &dyn ScannerApi, quiet: bool) -> CliResult<()> {
        let credentials = self.credentials()?;

        if self.target.is_none() && self.nmap_report.is_none() && self.host_list.is_none() {
            return Err(CliError::Usage(
                "no scan source: supply a TARGET, --nmap, or --list".to_string(),
            ));
        }

        if let Some(path) = &self.nmap_report {
            let targets = parse_nmap_report(path)?;
            if targets.is_empty() && !quiet {
                output::print_info(&format!(
                    "{} contains no http-capable services",
                    path.display()
                ));
            }
            self.run_batch(api, &targets, credentials.as_ref(), true, quiet)
                .await?;
        }

        if let Some(path) = &self.host_list {
            let targets = parse_host_list(path)?;
            self.run_batch(api, &targets, credentials.as_ref(), false, quiet)
                .await?;
        }

        if let Some(target) = &self.target {
            let targets = vec![target.clone()];
            self.run_batch(api, &targets, credentials.as_ref(), true, quiet)
                .await?;
        }

        Ok(())
    }

    /// Submit one batch and report its outcomes.
    ///
    /// With `abort_on_failure`, a failed submission becomes a fatal error.
    /// Otherwise failures were already reported per target and the batch
    /// result is success.
    async fn run_batch(
        &self,
        api: &dyn ScannerApi,
        targets: &[String],
        credentials: Option<&Credentials>,
        abort_on_failure: bool,
        quiet: bool,
    ) -> CliResult<()> {
        let report = submit_batch(api, targets, credentials, abort_on_failure).await;

        if !quiet {
            output::print_batch_report(&report);
        }

        if abort_on_failure && !report.all_submitted() {
            let failed = report
                .outcomes
                .iter()
                .find(|o| !o.is_submitted())
                .map(|o| o.target.clone())
                .unwrap_or_default();
            return Err(CliError::Submission(failed));
        }

        Ok(())
    }

    /// Build batch-wide credentials from the flag pair.
    fn credentials(&self) -> CliResult<Option<Credentials>> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Some(Credentials::new(username, password))),
            (None, None) => Ok(None),
            _ => Err(CliError::Usage(
                "--username and --password must be supplied together".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(username: Option<&str>, password: Option<&str>) -> ScanCommand {
        ScanCommand {
            target: Some("http://example.com".to_string()),
            nmap_report: None,
            host_list: None,
            username: username.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_credentials_require_both_flags() {
        assert!(command(Some("admin"), None).credentials().is_err());
        assert!(command(None, Some("hunter2")).credentials().is_err());
    }

    #[test]
    fn test_credentials_absent_means_unauthenticated() {
        assert_eq!(command(None, None).credentials().unwrap(), None);
    }

    #[test]
    fn test_credentials_pair_accepted() {
        let creds = command(Some("admin"), Some("hunter2"))
            .credentials()
            .unwrap()
            .unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "hunter2");
    }
}
