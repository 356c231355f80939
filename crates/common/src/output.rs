//! JSON file output
//!
//! Files are written to a `.tmp` sibling and renamed into place so a reader
//! never sees a half-written report.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PollError;

/// Serialize `value` with two-space indentation and write it atomically to `path`.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PollError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut json = serde_json::to_vec_pretty(value)?;
    json.push(b'\n');

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PollError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Report {
        name: String,
        score: f64,
        tags: Vec<String>,
    }

    #[test]
    fn test_write_creates_parent_dirs_and_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("out").join("report.json");
        let report = Report {
            name: "run".to_string(),
            score: 0.875,
            tags: vec!["a".to_string(), "b".to_string()],
        };

        write_json_pretty(&path, &report).unwrap();

        let loaded: Report = read_json(&path).unwrap();
        assert_eq!(loaded, report);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_write_uses_two_space_indent_and_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("facts.json");
        let value = serde_json::json!({"facts": ["Chats aiment dormir — beaucoup"]});

        write_json_pretty(&path, &value).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"facts\": [\n    \""));
        assert!(content.contains("—"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");

        write_json_pretty(&path, &vec![1, 2, 3]).unwrap();
        write_json_pretty(&path, &vec![4]).unwrap();

        let loaded: Vec<i32> = read_json(&path).unwrap();
        assert_eq!(loaded, vec![4]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result: Result<Vec<i32>, _> = read_json(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(PollError::Io(_))));
    }
}
