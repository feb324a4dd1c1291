//! Entry store: load TOTP entries from a JSON file.
//!
//! Accepts either a bare array of entries or an object with an
//! `entries` array. File order is preserved; it becomes list order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::Entry;

/// Error while loading the entry file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryFile {
    Bare(Vec<Entry>),
    Wrapped { entries: Vec<Entry> },
}

/// Read and validate all entries from `path`.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_entries(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, entry) in entries.iter().enumerate() {
        validate(entry).map_err(|reason| StoreError::InvalidEntry { index, reason })?;
    }

    tracing::info!(count = entries.len(), path = %path.display(), "loaded entries");
    Ok(entries)
}

/// Parse entry JSON without validation.
pub fn parse_entries(raw: &str) -> Result<Vec<Entry>, serde_json::Error> {
    let file: EntryFile = serde_json::from_str(raw)?;
    Ok(match file {
        EntryFile::Bare(entries) => entries,
        EntryFile::Wrapped { entries } => entries,
    })
}

fn validate(entry: &Entry) -> Result<(), String> {
    if entry.secret.trim().is_empty() {
        return Err(format!("'{}' has an empty secret", entry.label));
    }
    if !(6..=8).contains(&entry.digits) {
        return Err(format!("'{}' has unsupported digits {}", entry.label, entry.digits));
    }
    if entry.period == 0 {
        return Err(format!("'{}' has a zero period", entry.label));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn loads_bare_array_in_order() {
        let file = write_temp(
            r#"[
                {"label": "GitHub - alice", "secret": "JBSWY3DPEHPK3PXP"},
                {"label": "AWS", "issuer": "Amazon", "secret": "GEZDGNBVGY3TQOJQ"}
            ]"#,
        );
        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "GitHub - alice");
        assert_eq!(entries[1].issuer, "Amazon");
    }

    #[test]
    fn loads_wrapped_object() {
        let file = write_temp(r#"{"entries": [{"label": "AWS", "secret": "GEZDGNBVGY3TQOJQ"}]}"#);
        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_array_is_valid() {
        let file = write_temp("[]");
        assert!(load_entries(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_entries(Path::new("/nonexistent/entries.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = write_temp("{not json");
        assert!(matches!(load_entries(file.path()), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let file = write_temp(
            r#"[{"label": "ok", "secret": "A"}, {"label": "bad", "secret": "  "}]"#,
        );
        match load_entries(file.path()) {
            Err(StoreError::InvalidEntry { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected InvalidEntry, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_digits_are_rejected() {
        let file = write_temp(r#"[{"label": "x", "secret": "A", "digits": 4}]"#);
        assert!(matches!(
            load_entries(file.path()),
            Err(StoreError::InvalidEntry { index: 0, .. })
        ));
    }

    #[test]
    fn zero_period_is_rejected() {
        let file = write_temp(r#"[{"label": "x", "secret": "A", "period": 0}]"#);
        assert!(load_entries(file.path()).is_err());
    }

    #[test]
    fn error_message_names_the_file() {
        let err = load_entries(Path::new("/nonexistent/entries.json")).unwrap_err();
        assert!(err.to_string().contains("entries.json"));
    }
}
