//! # Alias Dictionary Loading
//!
//! ## Purpose
//! Loads the `law_id -> [alias, ...]` mapping that the `alias` module
//! compiles into a recognizer. Parsing is fail-fast: a non-numeric key or a
//! value that isn't an array of strings is a load failure, not a silent
//! skip, matching the teacher's `Config::from_file`.

use crate::errors::{CitationError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Catalog of codex names keyed by law id, as loaded from JSON.
pub type AliasDict = HashMap<i64, Vec<String>>;

/// Load an [`AliasDict`] from a JSON file on disk.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<AliasDict> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| CitationError::AliasLoadFailure {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    load_from_str(&raw).map_err(|e| match e {
        CitationError::AliasLoadFailure { details, .. } => CitationError::AliasLoadFailure {
            path: path.display().to_string(),
            details,
        },
        other => other,
    })
}

/// Parse an [`AliasDict`] from a JSON string.
pub fn load_from_str(raw: &str) -> Result<AliasDict> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CitationError::AliasLoadFailure {
            path: String::new(),
            details: format!("invalid JSON: {e}"),
        })?;

    let obj = value.as_object().ok_or_else(|| CitationError::AliasLoadFailure {
        path: String::new(),
        details: "top-level JSON value must be an object".to_string(),
    })?;

    let mut dict = AliasDict::with_capacity(obj.len());
    for (key, aliases) in obj {
        let law_id: i64 = key.parse().map_err(|_| CitationError::AliasLoadFailure {
            path: String::new(),
            details: format!("key '{key}' is not a decimal integer"),
        })?;

        let list = aliases
            .as_array()
            .ok_or_else(|| CitationError::AliasLoadFailure {
                path: String::new(),
                details: format!("value for law id {law_id} is not an array"),
            })?;

        let mut names = Vec::with_capacity(list.len());
        for item in list {
            let s = item.as_str().ok_or_else(|| CitationError::AliasLoadFailure {
                path: String::new(),
                details: format!("alias for law id {law_id} is not a string"),
            })?;
            names.push(s.to_string());
        }

        dict.insert(law_id, names);
    }

    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_dict() {
        let raw = r#"{"15": ["НК РФ", "Налоговый кодекс РФ"], "22": ["КоАП РФ"]}"#;
        let dict = load_from_str(raw).unwrap();
        assert_eq!(dict.get(&15).unwrap().len(), 2);
        assert_eq!(dict.get(&22).unwrap(), &vec!["КоАП РФ".to_string()]);
    }

    #[test]
    fn rejects_non_numeric_key() {
        let raw = r#"{"nk": ["НК РФ"]}"#;
        assert!(load_from_str(raw).is_err());
    }

    #[test]
    fn rejects_non_array_value() {
        let raw = r#"{"15": "НК РФ"}"#;
        assert!(load_from_str(raw).is_err());
    }

    #[test]
    fn rejects_non_string_alias() {
        let raw = r#"{"15": ["НК РФ", 5]}"#;
        assert!(load_from_str(raw).is_err());
    }

    #[test]
    fn rejects_non_object_top_level() {
        assert!(load_from_str("[1,2,3]").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        std::fs::write(&path, r#"{"15": ["НК РФ"]}"#).unwrap();
        let dict = load_from_path(&path).unwrap();
        assert_eq!(dict.get(&15).unwrap(), &vec!["НК РФ".to_string()]);
    }

    #[test]
    fn missing_file_is_alias_load_failure() {
        let err = load_from_path("/no/such/path.json").unwrap_err();
        assert!(matches!(err, CitationError::AliasLoadFailure { .. }));
    }
}
