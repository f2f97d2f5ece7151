//! Namespaced argument keys.
//!
//! A story's args are one flat record whose keys carry a dot-separated
//! namespace prefix (`props.label`, `window.token`, `localStorage.theme`,
//! `sessionStorage.draft`) plus the bare `url` key. The prefix decides which
//! runtime scope the value is routed to when the story renders.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Flat, insertion-ordered record of namespaced keys to JSON values.
pub type Args = Map<String, Value>;

/// The bare key carrying the navigation target.
pub const URL_KEY: &str = "url";

/// Target scope of a namespaced key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Component inputs.
    Props,
    /// Properties assigned onto the global `window`.
    Window,
    /// Entries written to `localStorage`.
    LocalStorage,
    /// Entries written to `sessionStorage`.
    SessionStorage,
}

impl Namespace {
    /// Every recognized namespace.
    pub const ALL: [Namespace; 4] = [
        Namespace::Props,
        Namespace::Window,
        Namespace::LocalStorage,
        Namespace::SessionStorage,
    ];

    /// Namespaces applied as environment side effects at render time.
    pub const ENVIRONMENT: [Namespace; 3] = [
        Namespace::Window,
        Namespace::LocalStorage,
        Namespace::SessionStorage,
    ];

    /// Order in which namespaces are flattened into synthesized args.
    pub const SYNTHESIS_ORDER: [Namespace; 4] = [
        Namespace::Window,
        Namespace::LocalStorage,
        Namespace::SessionStorage,
        Namespace::Props,
    ];

    /// The prefix token, without the trailing dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Props => "props",
            Namespace::Window => "window",
            Namespace::LocalStorage => "localStorage",
            Namespace::SessionStorage => "sessionStorage",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| format!("unknown namespace '{}'", s))
    }
}

/// Result of decoding a flat key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedKey<'a> {
    /// `<namespace>.<local_key>`; `local_key` may be empty.
    Namespaced {
        namespace: Namespace,
        local_key: &'a str,
    },
    /// The bare `url` key.
    Url,
    /// Anything else. Inert keys are dropped.
    Inert,
}

/// Decode a flat key by prefix.
pub fn decode(key: &str) -> DecodedKey<'_> {
    if key == URL_KEY {
        return DecodedKey::Url;
    }

    for namespace in Namespace::ALL {
        let local = key
            .strip_prefix(namespace.as_str())
            .and_then(|rest| rest.strip_prefix('.'));
        if let Some(local_key) = local {
            return DecodedKey::Namespaced {
                namespace,
                local_key,
            };
        }
    }

    DecodedKey::Inert
}

/// Encode a namespace and local key into a flat key.
pub fn encode(namespace: Namespace, local_key: &str) -> String {
    format!("{}.{}", namespace, local_key)
}

/// Filter `record` down to one namespace, stripping the prefix.
///
/// Keys with an empty local part (`"props."`) are excluded.
pub fn split_by_namespace(record: &Args, namespace: Namespace) -> Args {
    record
        .iter()
        .filter_map(|(key, value)| match decode(key) {
            DecodedKey::Namespaced {
                namespace: ns,
                local_key,
            } if ns == namespace && !local_key.is_empty() => {
                Some((local_key.to_string(), value.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Flatten a local mapping back into namespaced keys, appending to `into`.
///
/// Empty local keys are skipped so that the result splits back to `mapping`.
pub fn flatten_into(namespace: Namespace, mapping: &Map<String, Value>, into: &mut Args) {
    for (local_key, value) in mapping {
        if local_key.is_empty() {
            continue;
        }
        into.insert(encode(namespace, local_key), value.clone());
    }
}

/// Side effects a story applies to its host environment when it renders.
///
/// The generated `Template` performs exactly these effects against the
/// environment object it was constructed with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentEffects {
    /// Properties assigned onto `window`.
    pub window: Args,
    /// `localStorage.setItem` calls.
    pub local_storage: Args,
    /// `sessionStorage.setItem` calls.
    pub session_storage: Args,
    /// Navigation target passed to `router.replace`.
    ///
    /// Only a non-empty string navigates; the generated code skips falsy urls.
    pub navigate_to: Option<String>,
}

impl EnvironmentEffects {
    /// Derive the effect set from a flat args record.
    pub fn from_args(args: &Args) -> Self {
        let navigate_to = match args.get(URL_KEY) {
            Some(Value::String(url)) if !url.is_empty() => Some(url.clone()),
            _ => None,
        };

        Self {
            window: split_by_namespace(args, Namespace::Window),
            local_storage: split_by_namespace(args, Namespace::LocalStorage),
            session_storage: split_by_namespace(args, Namespace::SessionStorage),
            navigate_to,
        }
    }

    /// Entries for one environment namespace.
    ///
    /// `Namespace::Props` is not an environment scope and yields `None`.
    pub fn scope(&self, namespace: Namespace) -> Option<&Args> {
        match namespace {
            Namespace::Window => Some(&self.window),
            Namespace::LocalStorage => Some(&self.local_storage),
            Namespace::SessionStorage => Some(&self.session_storage),
            Namespace::Props => None,
        }
    }

    /// Total number of environment assignments, navigation excluded.
    pub fn assignment_count(&self) -> usize {
        self.window.len() + self.local_storage.len() + self.session_storage.len()
    }

    /// Whether rendering touches nothing outside the component.
    pub fn is_empty(&self) -> bool {
        self.assignment_count() == 0 && self.navigate_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Args {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_decode_namespaced_key() {
        assert_eq!(
            decode("props.label"),
            DecodedKey::Namespaced {
                namespace: Namespace::Props,
                local_key: "label"
            }
        );
        assert_eq!(
            decode("localStorage.theme"),
            DecodedKey::Namespaced {
                namespace: Namespace::LocalStorage,
                local_key: "theme"
            }
        );
    }

    #[test]
    fn test_decode_keeps_dots_in_local_key() {
        assert_eq!(
            decode("window.app.config"),
            DecodedKey::Namespaced {
                namespace: Namespace::Window,
                local_key: "app.config"
            }
        );
    }

    #[test]
    fn test_decode_url_and_inert() {
        assert_eq!(decode("url"), DecodedKey::Url);
        assert_eq!(decode("title"), DecodedKey::Inert);
        assert_eq!(decode("propsx.label"), DecodedKey::Inert);
        assert_eq!(decode("urlx"), DecodedKey::Inert);
        assert_eq!(decode(""), DecodedKey::Inert);
    }

    #[test]
    fn test_decode_empty_local_key() {
        assert_eq!(
            decode("props."),
            DecodedKey::Namespaced {
                namespace: Namespace::Props,
                local_key: ""
            }
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(Namespace::SessionStorage, "draft"), "sessionStorage.draft");
        assert_eq!(encode(Namespace::Props, "label"), "props.label");
    }

    #[test]
    fn test_split_by_namespace() {
        let record = args(json!({
            "props.label": "Hi",
            "props.": "dropped",
            "window.token": "abc",
            "url": "/home",
            "other": 1
        }));

        let props = split_by_namespace(&record, Namespace::Props);
        assert_eq!(props, args(json!({ "label": "Hi" })));

        let window = split_by_namespace(&record, Namespace::Window);
        assert_eq!(window, args(json!({ "token": "abc" })));

        assert!(split_by_namespace(&record, Namespace::LocalStorage).is_empty());
    }

    #[test]
    fn test_split_empty_record() {
        assert!(split_by_namespace(&Args::new(), Namespace::Props).is_empty());
    }

    #[test]
    fn test_flatten_into_skips_empty_local_keys() {
        let mapping = args(json!({ "a": 1, "": 2, "b": 3 }));
        let mut out = Args::new();
        flatten_into(Namespace::Props, &mapping, &mut out);

        let keys: Vec<_> = out.keys().cloned().collect();
        assert_eq!(keys, vec!["props.a", "props.b"]);
    }

    #[test]
    fn test_namespace_from_str() {
        assert_eq!("localStorage".parse::<Namespace>(), Ok(Namespace::LocalStorage));
        assert!("localstorage".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_environment_effects_from_args() {
        let record = args(json!({
            "window.user": { "id": 7 },
            "localStorage.theme": "dark",
            "sessionStorage.draft": "x",
            "props.label": "Hi",
            "url": "/settings"
        }));

        let effects = EnvironmentEffects::from_args(&record);
        assert_eq!(effects.window, args(json!({ "user": { "id": 7 } })));
        assert_eq!(effects.local_storage, args(json!({ "theme": "dark" })));
        assert_eq!(effects.session_storage, args(json!({ "draft": "x" })));
        assert_eq!(effects.navigate_to.as_deref(), Some("/settings"));
        assert_eq!(effects.assignment_count(), 3);
        assert!(effects.scope(Namespace::Props).is_none());
    }

    #[test]
    fn test_environment_effects_skip_falsy_url() {
        let record = args(json!({ "props.label": "Hi", "url": null }));
        let effects = EnvironmentEffects::from_args(&record);
        assert!(effects.is_empty());

        let record = args(json!({ "url": "" }));
        assert!(EnvironmentEffects::from_args(&record).navigate_to.is_none());
    }
}
