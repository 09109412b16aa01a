//! Batch scan orchestration.
//!
//! Drives a batch of targets through the submission seam sequentially,
//! recording a structured outcome per target. Continuation after a failed
//! submission is a policy decision made by the caller: single explicit
//! targets and report-derived batches are all-or-nothing, host-list batches
//! are best-effort. Both run through this one routine, parameterized by
//! `abort_on_failure`.

use serde::Serialize;
use tracing::debug;

use crate::api::{RejectCause, ScanLocation, ScanSubmitter, SubmitOutcome};
use crate::config::Credentials;

/// Final state of one target in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// The scan was accepted; the service returned this location handle.
    Submitted(ScanLocation),
    /// The submission was rejected.
    Failed(RejectCause),
}

/// Outcome record for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    pub target: String,
    pub status: SubmissionStatus,
}

impl TargetOutcome {
    /// The scan location, when the submission succeeded.
    pub fn location(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Submitted(location) => Some(location),
            SubmissionStatus::Failed(_) => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitted(_))
    }
}

/// Structured result of one orchestration pass.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Per-target outcomes, in submission order. When the batch aborted,
    /// targets after the failing one are absent: they were never attempted.
    pub outcomes: Vec<TargetOutcome>,
    /// Whether the batch stopped early on a failure.
    pub aborted: bool,
}

impl BatchReport {
    /// Number of failed submissions.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_submitted()).count()
    }

    /// Whether every attempted submission succeeded.
    pub fn all_submitted(&self) -> bool {
        self.failed() == 0
    }
}

/// Submit a batch of targets sequentially.
///
/// With `abort_on_failure` set, the first rejected submission ends the pass
/// and no further targets are attempted (in-flight work is never cancelled;
/// the orchestrator simply stops issuing calls). Without it, every target
/// is attempted and failures are recorded individually.
///
/// An empty batch is a no-op and returns an empty report.
pub async fn submit_batch<S: ScanSubmitter + ?Sized>(
    submitter: &S,
    targets: &[String],
    credentials: Option<&Credentials>,
    abort_on_failure: bool,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(targets.len());
    let mut aborted = false;

    for target in targets {
        debug!("submitting {}", target);
        let outcome = submitter.submit(target, credentials).await;

        let failed = matches!(outcome, SubmitOutcome::Rejected(_));
        outcomes.push(TargetOutcome {
            target: target.clone(),
            status: match outcome {
                SubmitOutcome::Accepted(location) => SubmissionStatus::Submitted(location),
                SubmitOutcome::Rejected(cause) => SubmissionStatus::Failed(cause),
            },
        });

        if failed && abort_on_failure {
            aborted = true;
            break;
        }
    }

    BatchReport { outcomes, aborted }
}
