//! Target acquisition.
//!
//! Scan targets come from three sources: a single operator-supplied string,
//! an nmap XML report, or a flat host-list file. Each source yields an
//! ordered sequence of target strings (URLs or host:port pairs) that the
//! orchestrator consumes exactly once.

mod hostlist;
mod nmap;

pub use hostlist::parse_host_list;
pub use nmap::parse_nmap_report;

use thiserror::Error;

/// Error type for structured-report parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML in {path}: {reason}")]
    MalformedXml { path: String, reason: String },

    #[error("{path} is not an nmap report (no <nmaprun> root element)")]
    NotAnNmapReport { path: String },
}
