//! Controls schema extraction.
//!
//! The controls schema is the list of arg keys a story viewer exposes as
//! adjustable inputs. It is the union of every example's keys, so all named
//! stories of a component share one stable control list.

use crate::namespace::{self, Namespace, URL_KEY};
use crate::spec::StoryExample;
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;

/// Ordered, duplicate-free list of control keys.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ControlsSchema {
    keys: IndexSet<String>,
}

// Order is part of the schema; IndexSet equality ignores it.
impl PartialEq for ControlsSchema {
    fn eq(&self, other: &Self) -> bool {
        self.keys.iter().eq(other.keys.iter())
    }
}

impl Eq for ControlsSchema {}

impl ControlsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key unless already present. Returns whether it was new.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys as a plain vector, in schema order.
    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

impl FromIterator<String> for ControlsSchema {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Derive the controls schema from a component's examples.
///
/// Object-valued fields named after a known namespace contribute one
/// `<namespace>.<key>` entry per non-empty nested key. `url` contributes
/// itself when its value is truthy. Every other field is inert, matching what
/// [`crate::exports::synthesize`] copies into args. First occurrence wins the
/// position.
pub fn extract(examples: &[StoryExample]) -> ControlsSchema {
    let mut schema = ControlsSchema::new();

    for example in examples {
        for (field, value) in &example.fields {
            if field == URL_KEY {
                if is_truthy(value) {
                    schema.insert(URL_KEY);
                }
                continue;
            }

            let (Ok(ns), Value::Object(nested)) = (field.parse::<Namespace>(), value) else {
                continue;
            };
            for key in nested.keys().filter(|k| !k.is_empty()) {
                schema.insert(namespace::encode(ns, key));
            }
        }
    }

    schema
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::StorySpec;
    use serde_json::json;

    fn examples(json: &str) -> Vec<StoryExample> {
        StorySpec::from_json_str(json).unwrap().examples
    }

    #[test]
    fn test_extract_merges_heterogeneous_examples() {
        let schema = extract(&examples(
            r#"[
                { "title": "One", "props": { "a": 1 } },
                { "title": "Two", "props": { "a": 2, "b": 3 } }
            ]"#,
        ));

        assert_eq!(schema.to_vec(), vec!["props.a", "props.b"]);
    }

    #[test]
    fn test_extract_includes_scalar_fields_and_environment() {
        let schema = extract(&examples(
            r#"[
                { "title": "Big", "props": { "label": "Hi" }, "url": "/big" },
                { "title": "Auth", "localStorage": { "token": "t" }, "window": { "flag": true } }
            ]"#,
        ));

        assert_eq!(
            schema.to_vec(),
            vec!["props.label", "url", "localStorage.token", "window.flag"]
        );
    }

    #[test]
    fn test_extract_skips_title_and_empty_nested_keys() {
        let example = StoryExample::new("Big").with_field("props", json!({ "": 1, "x": 2 }));
        let schema = extract(&[example]);
        assert_eq!(schema.to_vec(), vec!["props.x"]);
        assert!(!schema.contains("title"));
    }

    #[test]
    fn test_extract_drops_inert_fields() {
        let schema = extract(&examples(
            r#"[{
                "title": "Big",
                "notes": "x",
                "meta": { "k": 1 },
                "props": { "label": "Hi" },
                "window": "not an object"
            }]"#,
        ));
        assert_eq!(schema.to_vec(), vec!["props.label"]);
    }

    #[test]
    fn test_extract_url_only_when_truthy() {
        let schema = extract(&examples(
            r#"[
                { "title": "A", "url": null },
                { "title": "B", "url": "" },
                { "title": "C", "url": false }
            ]"#,
        ));
        assert!(schema.is_empty());

        let schema = extract(&examples(
            r#"[{ "title": "A", "url": null }, { "title": "B", "url": "/b" }]"#,
        ));
        assert_eq!(schema.to_vec(), vec!["url"]);
    }

    #[test]
    fn test_extract_empty() {
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_serializes_as_array() {
        let schema: ControlsSchema = vec!["props.a".to_string(), "url".to_string()]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&schema).unwrap(), r#"["props.a","url"]"#);
    }
}
