//! Story export synthesis.
//!
//! Each example becomes one named export whose args are already flattened
//! into namespaced keys, ready for the story viewer's controls.

use crate::namespace::{self, Args, EnvironmentEffects, Namespace, URL_KEY};
use crate::spec::StoryExample;
use serde_json::Value;

/// Name of the export emitted when a component has no examples.
pub const DEFAULT_EXPORT_NAME: &str = "Default";

/// One named story export.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryExport {
    /// Exported binding name.
    pub name: String,

    /// Flat args record keyed by namespaced keys.
    pub args: Args,
}

impl StoryExport {
    /// The synthetic export used when there are no examples: empty args.
    pub fn default_story() -> Self {
        Self {
            name: DEFAULT_EXPORT_NAME.to_string(),
            args: Args::new(),
        }
    }

    /// Props the component receives on first render.
    pub fn props(&self) -> Args {
        namespace::split_by_namespace(&self.args, Namespace::Props)
    }

    /// Environment effects applied when this story renders.
    pub fn effects(&self) -> EnvironmentEffects {
        EnvironmentEffects::from_args(&self.args)
    }
}

/// Turn one example into a named export.
///
/// Namespaces are flattened in `window`, `localStorage`, `sessionStorage`,
/// `props` order. `url` is always present last, `null` when the example has
/// none, so every export carries the same shape. The title is used verbatim
/// as the export name.
pub fn synthesize(example: &StoryExample) -> StoryExport {
    let mut args = Args::new();

    for ns in Namespace::SYNTHESIS_ORDER {
        if let Some(mapping) = example.namespace(ns) {
            namespace::flatten_into(ns, mapping, &mut args);
        }
    }

    args.insert(
        URL_KEY.to_string(),
        example.url().cloned().unwrap_or(Value::Null),
    );

    StoryExport {
        name: example.title.clone(),
        args,
    }
}

/// Synthesize every example, or the single `Default` export for none.
pub fn synthesize_all(examples: &[StoryExample]) -> Vec<StoryExport> {
    if examples.is_empty() {
        return vec![StoryExport::default_story()];
    }

    examples.iter().map(synthesize).collect()
}
