//! Output formatting module.
//!
//! Console reporting for submission batches and inquiry results, plus the
//! issue-export writer. The remote service's result schemas are treated as
//! opaque: rendering picks out well-known members when present and falls
//! back to pretty JSON otherwise.

use std::fs;
use std::io;
use std::path::Path;

use console::style;
use serde_json::Value;

use crate::orchestrator::{BatchReport, SubmissionStatus};

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("Success:").green().bold(), msg);
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an informational message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("Info:").cyan().bold(), msg);
}

/// Print the per-target outcomes of a submission batch.
pub fn print_batch_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        match &outcome.status {
            SubmissionStatus::Submitted(location) => {
                print_success(&format!(
                    "scanning {} over {}",
                    style(&outcome.target).white().bold(),
                    location
                ));
            }
            SubmissionStatus::Failed(cause) => {
                print_error(&format!("can't start scan over {}: {}", outcome.target, cause));
            }
        }
    }

    if report.aborted {
        print_warning("batch aborted on first failure; remaining targets were not attempted");
    }
}

/// Print a scan report.
///
/// Shows the scan status and an issue table when the response carries the
/// well-known members, otherwise dumps the report as pretty JSON.
pub fn print_scan_report(report: &Value) {
    let status = report.get("scan_status").and_then(Value::as_str);
    let issues = issue_events(report);

    if status.is_none() && issues.is_none() {
        println!("{}", pretty(report));
        return;
    }

    if let Some(status) = status {
        println!("  {} {}", style("Scan status:").bold(), status);
    }

    if let Some(issues) = issues {
        println!("  {} {}", style("Issues found:").bold(), issues.len());
        if !issues.is_empty() {
            println!();
            println!(
                "  {:^10}  {}",
                style("SEVERITY").bold(),
                style("ISSUE").bold()
            );
            for issue in issues {
                let (name, severity) = issue_summary(issue);
                println!("  {:^10}  {}", severity_style(&severity), name);
            }
        }
    }
}

/// Print a scan metrics report.
pub fn print_metrics(metrics: &Value) {
    match metrics.as_object() {
        Some(entries) => {
            println!("  {}", style("Metrics:").bold());
            for (key, value) in entries {
                println!("    {:<32} {}", key, render_scalar(value));
            }
        }
        None => println!("{}", pretty(metrics)),
    }
}

/// Print a vulnerability description.
pub fn print_description(name: &str, description: &str) {
    println!("  {}", style(name).white().bold());
    println!();
    println!("{}", description);
}

/// Print the vulnerability-name catalog.
pub fn print_names(names: &[String]) {
    for name in names {
        println!("  {} {}", style("•").dim(), name);
    }
    println!();
    print_info(&format!("{} known issue(s)", names.len()));
}

/// Serialize the issue set of a scan report to a file as pretty JSON.
///
/// Exports the report's issue events when present, otherwise the whole
/// report, so the written structure always matches what was retrieved.
pub fn export_issues(path: impl AsRef<Path>, report: &Value) -> io::Result<()> {
    let issues = report.get("issue_events").unwrap_or(report);
    fs::write(path, pretty(issues))
}

fn issue_events(report: &Value) -> Option<&Vec<Value>> {
    report.get("issue_events").and_then(Value::as_array)
}

/// Pull a displayable (name, severity) pair out of one issue event.
fn issue_summary(event: &Value) -> (String, String) {
    let issue = event.get("issue").unwrap_or(event);
    let name = issue
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("(unnamed issue)")
        .to_string();
    let severity = issue
        .get("severity")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    (name, severity)
}

fn severity_style(severity: &str) -> console::StyledObject<String> {
    let text = severity.to_string();
    match severity {
        "high" => style(text).red().bold(),
        "medium" => style(text).yellow(),
        "low" => style(text).green(),
        _ => style(text).dim(),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_issue_set_as_valid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.json");

        let report = json!({
            "scan_status": "succeeded",
            "issue_events": [
                { "issue": { "name": "SQL injection", "severity": "high" } }
            ]
        });

        export_issues(&path, &report).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report["issue_events"]);
    }

    #[test]
    fn test_export_falls_back_to_whole_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = json!({ "vendor_specific": true });
        export_issues(&path, &report).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report);
    }

    #[test]
    fn test_issue_summary_tolerates_missing_members() {
        let (name, severity) = issue_summary(&json!({}));
        assert_eq!(name, "(unnamed issue)");
        assert_eq!(severity, "unknown");
    }

    #[test]
    fn test_issue_summary_reads_nested_issue() {
        let event = json!({ "issue": { "name": "XSS", "severity": "medium" } });
        let (name, severity) = issue_summary(&event);
        assert_eq!(name, "XSS");
        assert_eq!(severity, "medium");
    }
}
