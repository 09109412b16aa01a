//! Flat host-list file parsing.

use std::path::Path;

use tracing::debug;

use crate::error::{CliError, CliResult};

/// Parse a flat host-list file, one target per line.
///
/// Blank lines are skipped. A missing or unreadable file is a fatal IO
/// error; an empty file yields an empty list.
pub fn parse_host_list(path: impl AsRef<Path>) -> CliResult<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let targets: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("parsed {}: {} target(s)", path.display(), targets.len());
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn list_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_one_target_per_nonblank_line() {
        let file = list_file("http://example.com\n\n10.0.0.5:8080\n   \nexample.org\n");
        let targets = parse_host_list(file.path()).unwrap();
        assert_eq!(
            targets,
            vec!["http://example.com", "10.0.0.5:8080", "example.org"]
        );
    }

    #[test]
    fn test_empty_file_yields_empty_list() {
        let file = list_file("");
        let targets = parse_host_list(file.path()).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal_io_error() {
        let result = parse_host_list("/nonexistent/hosts.txt");
        assert!(matches!(result, Err(CliError::Io { .. })));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let file = list_file("  http://example.com  \n");
        let targets = parse_host_list(file.path()).unwrap();
        assert_eq!(targets, vec!["http://example.com"]);
    }
}
