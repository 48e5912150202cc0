//! Data mappings and their placeholder form.

use docgen_docx::Replacements;
use serde_json::Value;

/// Ordered data mapping: key to any JSON-like value.
pub type DataMap = serde_json::Map<String, Value>;

/// String form of a value as it appears in a document.
///
/// Strings are used verbatim. Null and booleans use the `None`, `True` and
/// `False` spellings the template renderer also prints, and arrays and
/// objects are written as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => NONE.to_string(),
        Value::Bool(b) => bool_str(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// How null is written in document text.
pub(crate) const NONE: &str = "None";

pub(crate) fn bool_str(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Literal replacements for every key: `{{key}}` and `{{ key }}`, in
/// mapping order.
pub fn placeholder_replacements(data: &DataMap) -> Replacements {
    let mut replacements = Replacements::new();
    for (key, value) in data {
        let text = value_to_string(value);
        for pattern in [format!("{{{{{}}}}}", key), format!("{{{{ {} }}}}", key)] {
            match replacements.get_mut(&pattern) {
                Some(existing) => existing.clone_from(&text),
                None => {
                    replacements.insert(pattern, text.clone());
                }
            }
        }
    }
    replacements
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn data(value: Value) -> DataMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_value_strings() {
        assert_eq!(value_to_string(&json!("Alice")), "Alice");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(1.5)), "1.5");
        assert_eq!(value_to_string(&json!(true)), "True");
        assert_eq!(value_to_string(&json!(false)), "False");
        assert_eq!(value_to_string(&json!(null)), "None");
        assert_eq!(value_to_string(&json!([1, "a"])), r#"[1,"a"]"#);
        assert_eq!(value_to_string(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_replacements_in_mapping_order() {
        let data = data(json!({"name": "Alice", "total": 12}));
        let replacements = placeholder_replacements(&data);

        let pairs: Vec<(&str, &str)> = replacements
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("{{name}}", "Alice"),
                ("{{ name }}", "Alice"),
                ("{{total}}", "12"),
                ("{{ total }}", "12"),
            ]
        );
    }

    #[test]
    fn test_colliding_pattern_keeps_first_position() {
        let data = data(json!({" a ": "first", "a": "second"}));
        let replacements = placeholder_replacements(&data);

        let keys: Vec<&str> = replacements.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["{{ a }}", "{{  a  }}", "{{a}}"]);
        assert_eq!(replacements.get("{{ a }}").map(String::as_str), Some("second"));
    }
}
