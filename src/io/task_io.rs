use std::fs;
use std::path::{Path, PathBuf};

use crate::model::task::Task;

/// Error type for reading task records
#[derive(Debug, thiserror::Error)]
pub enum TaskIoError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tasks: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Parse a JSON array of task records.
pub fn parse_tasks(text: &str) -> Result<Vec<Task>, TaskIoError> {
    Ok(serde_json::from_str(text)?)
}

pub fn read_tasks(path: &Path) -> Result<Vec<Task>, TaskIoError> {
    let text = fs::read_to_string(path).map_err(|e| TaskIoError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_tasks(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_task_array() {
        let tasks = parse_tasks(
            r#"[
  {"key": "T0001", "title": "Fetch groceries", "due": "20150106", "deps": ["T0002"]},
  {"key": "T0002", "title": "Buy mineral water", "time": 2, "done": true}
]"#,
        )
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].due.as_deref(), Some("20150106"));
        assert_eq!(tasks[0].deps, vec!["T0002".to_string()]);
        assert!(tasks[1].done);
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let err = parse_tasks(r#"[{"title": "No key"}]"#).unwrap_err();
        assert!(matches!(err, TaskIoError::ParseError(_)));
    }

    #[test]
    fn test_read_tasks_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(&path, r#"[{"key": "T1", "title": "One"}]"#).unwrap();
        let tasks = read_tasks(&path).unwrap();
        assert_eq!(tasks[0].key, "T1");
    }

    #[test]
    fn test_read_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_tasks(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TaskIoError::ReadError { .. }));
    }
}
