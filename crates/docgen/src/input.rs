/*
 * input.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loading the data mapping and template text from the command line.

use std::path::Path;

use anyhow::{Context, Result, bail};
use docgen_core::DataMap;
use serde_json::Value;
use tracing::debug;

/// Build the data mapping from an optional data file followed by `KEY=VALUE`
/// definitions. Definitions are applied in order, so later ones win.
pub fn load_data(path: Option<&Path>, defines: &[String]) -> Result<DataMap> {
    let mut data = match path {
        Some(path) => read_data_file(path)?,
        None => DataMap::new(),
    };

    for define in defines {
        let (key, value) = parse_define(define)?;
        data.insert(key.to_string(), Value::String(value.to_string()));
    }

    debug!(keys = data.len(), "Loaded data");
    Ok(data)
}

/// Read a data file. `.json` files are parsed as JSON, anything else as YAML.
pub fn read_data_file(path: &Path) -> Result<DataMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let value: Value = if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON data in {}", path.display()))?
    } else if text.trim().is_empty() {
        Value::Object(DataMap::new())
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML data in {}", path.display()))?
    };

    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Data in {} must be a mapping, found {}",
            path.display(),
            kind(&other)
        ),
    }
}

/// Read template text from a file.
pub fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))
}

fn parse_define(define: &str) -> Result<(&str, &str)> {
    match define.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Invalid definition '{define}', expected KEY=VALUE"),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_json_data() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.json", r#"{"client": "ACME", "total": 3}"#);

        let data = load_data(Some(&path), &[]).unwrap();
        assert_eq!(Value::Object(data), json!({"client": "ACME", "total": 3}));
    }

    #[test]
    fn test_yaml_data() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.yml", "client: ACME\nitems:\n  - one\n  - two\n");

        let data = load_data(Some(&path), &[]).unwrap();
        assert_eq!(
            Value::Object(data),
            json!({"client": "ACME", "items": ["one", "two"]})
        );
    }

    #[test]
    fn test_empty_yaml_is_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.yaml", "\n");
        assert!(load_data(Some(&path), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_defines_override_file_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.json", r#"{"client": "ACME", "total": 3}"#);
        let defines = vec![
            "client=Globex".to_string(),
            "note=a=b".to_string(),
            "client=Initech".to_string(),
        ];

        let data = load_data(Some(&path), &defines).unwrap();
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["client", "total", "note"]);
        assert_eq!(data["client"], json!("Initech"));
        assert_eq!(data["note"], json!("a=b"));
    }

    #[test]
    fn test_define_without_file() {
        let data = load_data(None, &["empty=".to_string()]).unwrap();
        assert_eq!(data["empty"], json!(""));
    }

    #[test]
    fn test_invalid_define() {
        assert!(load_data(None, &["novalue".to_string()]).is_err());
        assert!(load_data(None, &["=x".to_string()]).is_err());
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.json", "[1, 2]");

        let err = load_data(Some(&path), &[]).unwrap_err();
        assert!(err.to_string().contains("must be a mapping, found a sequence"));
    }

    #[test]
    fn test_missing_data_file() {
        let dir = TempDir::new().unwrap();
        let err = load_data(Some(&dir.path().join("absent.json")), &[]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read data file"));
    }
}
