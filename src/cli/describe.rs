//! Describe and names subcommand implementations.
//!
//! Both are static catalog lookups against the scanner's knowledge base,
//! independent of any submitted scan.

use clap::Parser;

use crate::api::ScannerApi;
use crate::error::{CliError, CliResult};
use crate::output;

/// Look up the description of a vulnerability by name.
#[derive(Parser, Debug)]
pub struct DescribeCommand {
    /// Vulnerability name, e.g. "SQL injection"
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl DescribeCommand {
    /// Execute the describe command.
    pub async fn execute(&self, api: &dyn ScannerApi) -> CliResult<()> {
        let description = api
            .issue_description(&self.name)
            .await
            .map_err(|e| CliError::Inquiry(e.to_string()))?;

        output::print_description(&self.name, &description);
        Ok(())
    }
}

/// List the vulnerability names known to the scanner.
#[derive(Parser, Debug)]
pub struct NamesCommand {}

impl NamesCommand {
    /// Execute the names command.
    pub async fn execute(&self, api: &dyn ScannerApi) -> CliResult<()> {
        let names = api
            .issue_names()
            .await
            .map_err(|e| CliError::Inquiry(e.to_string()))?;

        output::print_names(&names);
        Ok(())
    }
}
