//! Property-based tests for storygen.
//!
//! Properties tested:
//! - Namespace codec round trip
//! - Controls schema is duplicate-free, ordered by first occurrence and
//!   limited to namespaced keys and `url`
//! - One export per example, in order, named by title
//! - Import paths never contain backslashes

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::PathBuf;
use storygen::controls;
use storygen::exports;
use storygen::namespace::{self, Args, DecodedKey, Namespace};
use storygen::paths;
use storygen::spec::StoryExample;

fn arb_namespace() -> impl Strategy<Value = Namespace> {
    prop::sample::select(Namespace::ALL.to_vec())
}

fn arb_local_key() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_.]{0,12}"
}

fn arb_identifier() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,10}"
}

fn arb_example() -> impl Strategy<Value = StoryExample> {
    (
        arb_identifier(),
        prop::collection::vec(arb_local_key(), 0..4),
        prop::option::of("/[a-z]{0,6}"),
    )
        .prop_map(|(title, props, url)| {
            let mut example = StoryExample::new(title);
            let mapping: serde_json::Map<String, Value> =
                props.into_iter().map(|k| (k, json!(1))).collect();
            example = example
                .with_field("notes", json!("inert"))
                .with_field("props", Value::Object(mapping));
            if let Some(url) = url {
                example = example.with_field("url", json!(url));
            }
            example
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_codec_round_trip(ns in arb_namespace(), key in arb_local_key(), value in any::<i64>()) {
        let encoded = namespace::encode(ns, &key);
        prop_assert_eq!(
            namespace::decode(&encoded),
            DecodedKey::Namespaced { namespace: ns, local_key: key.as_str() }
        );

        let mut record = Args::new();
        record.insert(encoded, json!(value));
        let split = namespace::split_by_namespace(&record, ns);
        prop_assert_eq!(split.len(), 1);
        prop_assert_eq!(split.get(&key), Some(&json!(value)));
    }

    #[test]
    fn prop_split_never_leaks_other_namespaces(
        ns in arb_namespace(),
        other in arb_namespace(),
        key in arb_local_key(),
    ) {
        prop_assume!(ns != other);
        let mut record = Args::new();
        record.insert(namespace::encode(other, &key), json!(true));
        prop_assert!(namespace::split_by_namespace(&record, ns).is_empty());
    }

    #[test]
    fn prop_controls_unique_and_first_seen(examples in prop::collection::vec(arb_example(), 0..6)) {
        let schema = controls::extract(&examples);
        let keys: Vec<String> = schema.to_vec();

        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());

        // Replay the scan and check order against first occurrence.
        let mut seen = Vec::new();
        for example in &examples {
            for (field, value) in &example.fields {
                let candidates: Vec<String> = match (field.parse::<Namespace>(), value) {
                    (Ok(ns), Value::Object(map)) => {
                        map.keys().map(|k| namespace::encode(ns, k)).collect()
                    }
                    _ if field == "url" => vec![field.clone()],
                    _ => Vec::new(),
                };
                for candidate in candidates {
                    if !seen.contains(&candidate) {
                        seen.push(candidate);
                    }
                }
            }
        }
        prop_assert_eq!(keys, seen);
    }

    #[test]
    fn prop_one_export_per_example(examples in prop::collection::vec(arb_example(), 1..6)) {
        let synthesized = exports::synthesize_all(&examples);
        prop_assert_eq!(synthesized.len(), examples.len());
        for (export, example) in synthesized.iter().zip(&examples) {
            prop_assert_eq!(&export.name, &example.title);
            prop_assert!(export.args.contains_key("url"));
        }
    }

    #[test]
    fn prop_import_path_uses_forward_slashes(
        segments in prop::collection::vec("[a-z]{1,6}", 0..4),
        name in arb_identifier(),
    ) {
        let mut source = PathBuf::from("/root/views");
        let mut output = PathBuf::from("/root/stories");
        for segment in &segments {
            source.push(segment);
            output.push(segment);
        }
        source.push(format!("{}.vue", name));

        let import = paths::import_path_from(&output, &source).unwrap();
        prop_assert!(!import.contains('\\'));
        prop_assert!(import.starts_with("../"));
        let dirs: String = segments.iter().map(|s| format!("{}/", s)).collect();
        let expected = format!("views/{}{}.vue", dirs, name);
        prop_assert!(import.ends_with(&expected), "{} does not end with {}", import, expected);
    }
}
