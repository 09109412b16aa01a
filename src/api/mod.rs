//! REST client for the remote scanner API.
//!
//! The remote service owns all vulnerability detection; this module only
//! shapes requests and resolves responses. Endpoints used:
//!
//! - `GET  {base}/`                                  - reachability probe
//! - `POST {base}/scan`                              - submit a scan
//! - `GET  {base}/scan/{id}`                         - scan status, issues, metrics
//! - `GET  {base}/knowledge_base/issue_definitions`  - vulnerability catalog
//!
//! where `{base}` is `http://host:port/{key}/v0.1`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Credentials, EndpointConfig};

/// Handle returned by the remote service on successful scan submission.
pub type ScanLocation = String;

/// Errors from inquiry calls against the remote API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("response has no '{0}' member")]
    MissingMember(&'static str),

    #[error("no issue definition named '{0}'")]
    UnknownIssue(String),
}

/// Why a scan submission was rejected.
///
/// The orchestration layer only reports success or failure, but the cause
/// is preserved here so it stays available for logging and future retry
/// decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectCause {
    /// The request never completed (connect failure, timeout).
    Transport(String),
    /// The service answered with a non-success status.
    Status { status: u16, message: String },
    /// Success status but no scan handle in the response.
    MissingLocation,
}

impl std::fmt::Display for RejectCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(reason) => write!(f, "transport failure: {}", reason),
            Self::Status { status, message } if message.is_empty() => {
                write!(f, "rejected with status {}", status)
            }
            Self::Status { status, message } => {
                write!(f, "rejected with status {}: {}", status, message)
            }
            Self::MissingLocation => write!(f, "response carried no scan location"),
        }
    }
}

/// Outcome of one scan submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service accepted the scan and returned a location handle.
    Accepted(ScanLocation),
    /// The submission failed; the cause is retained internally.
    Rejected(RejectCause),
}

/// Scan submission payload.
#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    urls: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_logins: Option<Vec<ApplicationLogin<'a>>>,
}

#[derive(Debug, Serialize)]
struct ApplicationLogin<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> ScanRequest<'a> {
    fn new(target: &'a str, credentials: Option<&'a Credentials>) -> Self {
        Self {
            urls: vec![target],
            application_logins: credentials.map(|c| {
                vec![ApplicationLogin {
                    username: &c.username,
                    password: &c.password,
                }]
            }),
        }
    }
}

/// Submission seam between the orchestrator and the remote API.
///
/// Abstracted as a trait so batch-policy behavior can be exercised in tests
/// without a live endpoint.
#[async_trait]
pub trait ScanSubmitter: Send + Sync {
    /// Submit one target for scanning.
    async fn submit(&self, target: &str, credentials: Option<&Credentials>) -> SubmitOutcome;
}

/// The full remote-API surface the CLI commands dispatch against.
///
/// Like [`ScanSubmitter`], this exists so the probe gate and inquiry
/// behavior can be exercised in tests with a recording double instead of a
/// live endpoint.
#[async_trait]
pub trait ScannerApi: ScanSubmitter {
    /// Check that the remote API is reachable and the key is accepted.
    ///
    /// A single attempt, no retry. Any transport failure, non-success
    /// status, or authentication rejection yields `false`, and the caller
    /// must abort before attempting scans or inquiries.
    async fn probe(&self) -> bool;

    /// Fetch the full scan report (status, issue events, metrics) for a
    /// previously submitted scan.
    async fn scan_report(&self, scan_id: &str) -> Result<Value, ApiError>;

    /// Fetch the metrics block for a previously submitted scan.
    async fn scan_metrics(&self, scan_id: &str) -> Result<Value, ApiError>;

    /// Look up the description of a vulnerability by name.
    ///
    /// Matching is case-insensitive; operators type these by hand.
    async fn issue_description(&self, name: &str) -> Result<String, ApiError>;

    /// List the known vulnerability names, in catalog order.
    async fn issue_names(&self) -> Result<Vec<String>, ApiError>;
}

/// Client for the remote scanner REST API.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a new API client for the given endpoint.
    pub fn new(config: &EndpointConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("burpline/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit a scan for one target.
    ///
    /// Success is a 2xx response carrying a `Location` header with the scan
    /// handle. Every failure mode maps to a [`RejectCause`] rather than an
    /// error, since the continuation decision belongs to the orchestrator.
    pub async fn submit_scan(
        &self,
        target: &str,
        credentials: Option<&Credentials>,
    ) -> SubmitOutcome {
        let body = ScanRequest::new(target, credentials);

        let res = match self.http.post(self.url("/scan")).json(&body).send().await {
            Ok(res) => res,
            Err(e) => {
                warn!("scan submission for {} failed: {}", target, e);
                return SubmitOutcome::Rejected(RejectCause::Transport(e.to_string()));
            }
        };

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            warn!("scan submission for {} rejected ({})", target, status);
            return SubmitOutcome::Rejected(RejectCause::Status { status, message });
        }

        match res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
        {
            Some(location) if !location.is_empty() => {
                debug!("scan accepted for {}: location {}", target, location);
                SubmitOutcome::Accepted(location.to_string())
            }
            _ => SubmitOutcome::Rejected(RejectCause::MissingLocation),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let res = self.http.get(self.url(path)).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            return Err(ApiError::Api { status, message });
        }

        Ok(res.json().await?)
    }

    /// Fetch the vulnerability catalog.
    async fn issue_definitions(&self) -> Result<Value, ApiError> {
        self.get_json("/knowledge_base/issue_definitions").await
    }
}

#[async_trait]
impl ScanSubmitter for ApiClient {
    async fn submit(&self, target: &str, credentials: Option<&Credentials>) -> SubmitOutcome {
        self.submit_scan(target, credentials).await
    }
}

#[async_trait]
impl ScannerApi for ApiClient {
    async fn probe(&self) -> bool {
        match self.http.get(self.url("/")).send().await {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                debug!("probe rejected with status {}", res.status());
                false
            }
            Err(e) => {
                debug!("probe failed: {}", e);
                false
            }
        }
    }

    async fn scan_report(&self, scan_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/scan/{}", scan_id)).await
    }

    async fn scan_metrics(&self, scan_id: &str) -> Result<Value, ApiError> {
        let report = self.scan_report(scan_id).await?;
        report
            .get("scan_metrics")
            .cloned()
            .ok_or(ApiError::MissingMember("scan_metrics"))
    }

    async fn issue_description(&self, name: &str) -> Result<String, ApiError> {
        let definitions = self.issue_definitions().await?;
        find_description(&definitions, name)
            .ok_or_else(|| ApiError::UnknownIssue(name.to_string()))
    }

    async fn issue_names(&self) -> Result<Vec<String>, ApiError> {
        let definitions = self.issue_definitions().await?;
        Ok(collect_names(&definitions))
    }
}

/// Select a definition's description by case-insensitive name match.
fn find_description(definitions: &Value, name: &str) -> Option<String> {
    definitions.as_array()?.iter().find_map(|def| {
        let def_name = def.get("name")?.as_str()?;
        if def_name.eq_ignore_ascii_case(name) {
            Some(def.get("description")?.as_str()?.to_string())
        } else {
            None
        }
    })
}

/// Collect the `name` member of every definition, in catalog order.
fn collect_names(definitions: &Value) -> Vec<String> {
    definitions
        .as_array()
        .map(|defs| {
            defs.iter()
                .filter_map(|def| def.get("name")?.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_request_without_credentials() {
        let request = ScanRequest::new("http://example.com", None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, json!({ "urls": ["http://example.com"] }));
    }

    #[test]
    fn test_scan_request_with_credentials() {
        let creds = Credentials::new("admin", "hunter2");
        let request = ScanRequest::new("http://example.com", Some(&creds));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "urls": ["http://example.com"],
                "application_logins": [{ "username": "admin", "password": "hunter2" }]
            })
        );
    }

    #[test]
    fn test_find_description_case_insensitive() {
        let defs = json!([
            { "name": "SQL injection", "description": "Injection of SQL." },
            { "name": "Cross-site scripting (reflected)", "description": "XSS." }
        ]);
        assert_eq!(
            find_description(&defs, "sql injection").as_deref(),
            Some("Injection of SQL.")
        );
        assert!(find_description(&defs, "CSRF").is_none());
    }

    #[test]
    fn test_collect_names_preserves_catalog_order() {
        let defs = json!([
            { "name": "B issue", "description": "b" },
            { "name": "A issue", "description": "a" }
        ]);
        assert_eq!(collect_names(&defs), vec!["B issue", "A issue"]);
    }

    #[test]
    fn test_collect_names_tolerates_non_array_body() {
        assert!(collect_names(&json!({"error": "nope"})).is_empty());
    }

    #[test]
    fn test_reject_cause_display() {
        let cause = RejectCause::Status {
            status: 400,
            message: String::new(),
        };
        assert_eq!(cause.to_string(), "rejected with status 400");
        assert_eq!(
            RejectCause::MissingLocation.to_string(),
            "response carried no scan location"
        );
    }
}
