//! Sidecar story specifications.
//!
//! A component `Button.vue` may have a `Button.stories.json` next to it
//! holding a JSON array of named examples:
//!
//! ```json
//! [
//!   { "title": "Big", "props": { "label": "Hi" }, "url": "/big" },
//!   { "title": "LoggedIn", "window": { "user": { "id": 1 } } }
//! ]
//! ```

use crate::error::SpecError;
use crate::namespace::{Namespace, URL_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One named scenario for a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryExample {
    /// Export name of the story. Must be a valid JavaScript identifier.
    pub title: String,

    /// Every other field, in source order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl StoryExample {
    /// Create an example with no fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Map::new(),
        }
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The mapping stored under a namespace, if it is an object.
    pub fn namespace(&self, namespace: Namespace) -> Option<&Map<String, Value>> {
        self.fields.get(namespace.as_str()).and_then(Value::as_object)
    }

    /// The bare `url` field.
    pub fn url(&self) -> Option<&Value> {
        self.fields.get(URL_KEY)
    }
}

/// Ordered list of examples for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorySpec {
    pub examples: Vec<StoryExample>,
}

impl StorySpec {
    pub fn new(examples: Vec<StoryExample>) -> Self {
        Self { examples }
    }

    /// Parse a spec from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load a spec from disk.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpecError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SpecError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Self::from_json_str(&content).map_err(|e| SpecError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a spec, degrading every failure to the empty spec.
    ///
    /// A missing file is expected and logged at debug level; an unreadable or
    /// malformed file is logged as a warning. Both yield the same result.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(spec) => spec,
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path.display(), "no story spec, using default story");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e, "ignoring story spec");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }
}
