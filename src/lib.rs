//! # burpline - a CLI client for Burp-style scanner REST APIs
//!
//! burpline drives a vulnerability scanner's remote REST API from the
//! command line: it acquires scan targets from heterogeneous sources,
//! submits them for scanning, and retrieves the results.
//!
//! ## Features
//!
//! - **Target Sources**: a single URL, an nmap XML report (filtered to
//!   HTTP-capable services), or a flat host-list file
//! - **Batch Policies**: all-or-nothing submission for report-derived
//!   batches, best-effort for host lists
//! - **Result Retrieval**: scan status, issue lists with JSON export,
//!   metrics, and vulnerability-description lookups
//! - **Endpoint Gating**: the API endpoint is probed before any work runs
//!
//! All vulnerability detection happens on the remote service; burpline
//! only orchestrates requests against it.
//!
//! ## Architecture
//!
//! - [`config`] - Immutable endpoint configuration and credentials
//! - [`api`] - REST client: probe, submission, and inquiry calls
//! - [`targets`] - Target acquisition from reports and host lists
//! - [`orchestrator`] - Sequential batch submission with continuation policy
//! - [`cli`] - Subcommand definitions and handlers
//! - [`error`] - Error taxonomy
//! - [`output`] - Console reporting and issue export

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod targets;

// Re-export commonly used types
pub use api::{
    ApiClient, ApiError, RejectCause, ScanLocation, ScanSubmitter, ScannerApi, SubmitOutcome,
};
pub use config::{Credentials, EndpointConfig};
pub use error::{CliError, CliResult};
pub use orchestrator::{submit_batch, BatchReport, SubmissionStatus, TargetOutcome};
