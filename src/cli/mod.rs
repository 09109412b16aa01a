//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `burpline scan <target>` - Submit targets for scanning
//! - `burpline status <scan-id>` - Retrieve scan results and metrics
//! - `burpline describe <name>` - Look up a vulnerability description
//! - `burpline names` - List the known vulnerability names

mod describe;
mod scan;
mod status;

pub use describe::{DescribeCommand, NamesCommand};
pub use scan::ScanCommand;
pub use status::StatusCommand;

use clap::{Parser, Subcommand};

use crate::api::ScannerApi;
use crate::error::{CliError, CliResult};
use crate::output;

/// burpline - a command-line client for Burp-style scanner REST APIs.
///
/// All commands talk to a remote scanner API over HTTP, addressed by host,
/// port, and API key. The endpoint is probed once before any command runs;
/// an unreachable endpoint aborts immediately.
#[derive(Parser, Debug)]
#[command(name = "burpline")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drive a vulnerability scanner's REST API from the command line", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Scanner API host
    #[arg(short = 't', long, global = true, default_value = "127.0.0.1")]
    pub host: String,

    /// Scanner API port
    #[arg(short = 'p', long, global = true, default_value = "1337")]
    pub port: u16,

    /// API key
    #[arg(
        short = 'k',
        long,
        global = true,
        env = "BURPLINE_API_KEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub key: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one or more targets for scanning
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Retrieve status, issues, and metrics for a submitted scan
    #[command(alias = "st")]
    Status(StatusCommand),

    /// Look up the description of a vulnerability by name
    #[command(alias = "d")]
    Describe(DescribeCommand),

    /// List the vulnerability names known to the scanner
    #[command(alias = "n")]
    Names(NamesCommand),
}

/// Probe the endpoint, then dispatch the selected subcommand.
///
/// The probe gates everything: when it fails, the command aborts with
/// `UnreachableEndpoint` and no scan or inquiry call is ever issued.
pub async fn run_command(
    api: &dyn ScannerApi,
    command: &Commands,
    address: &str,
    quiet: bool,
) -> CliResult<()> {
    if !api.probe().await {
        return Err(CliError::UnreachableEndpoint(address.to_string()));
    }
    if !quiet {
        output::print_success(&format!("found scanner API endpoint on {}", address));
    }

    match command {
        Commands::Scan(cmd) => cmd.execute(api, quiet).await,
        Commands::Status(cmd) => cmd.execute(api, quiet).await,
        Commands::Describe(cmd) => cmd.execute(api).await,
        Commands::Names(cmd) => cmd.execute(api).await,
    }
}
