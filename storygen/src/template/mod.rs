//! Framework templates for story modules.
//!
//! Every template shares the same module contract: component import, prefix
//! helpers, environment helpers, `export default` metadata, a `Template`
//! class and one export per story. Templates only differ in the framework
//! imports and in how the `Template` class wires reactive props and routing.

mod vue2;
mod vue3;

pub use vue2::Vue2Template;
pub use vue3::Vue3Template;

use crate::controls::ControlsSchema;
use crate::exports::StoryExport;
use crate::module::{DefaultExport, Import, StoryModule};
use crate::paths::ComponentDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decorator wrapping every story in a container element.
pub const CONTAINER_DECORATOR: &str = "() => ({ template: '<div><story /></div>' })";

/// Lint pragma placed at the top of generated modules.
pub const LINT_HEADER: &str = "/* eslint-disable */";

/// Helpers that split a flat args record by namespace prefix.
pub const PREFIX_HELPERS: &str = r#"function extractAfterPrefix(prefix, key) {
  if (key.startsWith(prefix)) {
    return key.substring(prefix.length);
  }
  return '';
}

function buildData(args, prefix) {
  const data = {};
  Object.keys(args || {}).forEach((argsKey) => {
    const key = extractAfterPrefix(prefix + '.', argsKey);
    if (key) data[key] = args[argsKey];
  });
  return data;
}"#;

/// Helpers applying `window`, `localStorage` and `sessionStorage` args to an
/// explicit environment object.
pub const ENVIRONMENT_HELPERS: &str = r#"function defaultEnvironment() {
  return { window, localStorage, sessionStorage };
}

function applyEnvironment(env, args) {
  Object.assign(env.window, buildData(args, 'window'));
  Object.entries(buildData(args, 'localStorage')).forEach(([key, val]) => env.localStorage.setItem(key, val));
  Object.entries(buildData(args, 'sessionStorage')).forEach(([key, val]) => env.sessionStorage.setItem(key, val));
}"#;

/// Inputs for rendering one story module.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub descriptor: &'a ComponentDescriptor,
    /// Import specifier for the component, relative to the story file.
    pub import_path: &'a str,
    pub controls: &'a ControlsSchema,
    pub exports: &'a [StoryExport],
    /// Leading segment of the sidebar title.
    pub title_prefix: &'a str,
}

/// A framework-specific story template.
pub trait StoryTemplate: Send + Sync {
    /// Short identifier, as accepted on the command line.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Framework imports following the component import.
    fn framework_imports(&self) -> Vec<Import>;

    /// Source of the `Template` class rendering `component`.
    fn template_class(&self, component: &str) -> String;

    /// Assemble the full module document.
    fn build_module(&self, ctx: &RenderContext<'_>) -> StoryModule {
        let component = &ctx.descriptor.name;

        let mut imports = vec![Import::default_import(component.clone(), ctx.import_path)];
        imports.extend(self.framework_imports());

        StoryModule {
            header: vec![LINT_HEADER.to_string()],
            imports,
            helpers: vec![PREFIX_HELPERS.to_string(), ENVIRONMENT_HELPERS.to_string()],
            default_export: DefaultExport {
                title: format!("{}/{}", ctx.title_prefix, ctx.descriptor.relative_title_path),
                component: component.clone(),
                decorators: vec![CONTAINER_DECORATOR.to_string()],
                controls: ctx.controls.clone(),
            },
            template: self.template_class(component),
            exports: ctx.exports.to_vec(),
        }
    }
}

/// Target framework, chosen once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Options API: `data` plus an immediate `watch` and `this.$router`.
    Vue2,
    /// Composition API: `setup` with `reactive`, `watch` and `useRouter`.
    #[default]
    Vue3,
}

static VUE2: Vue2Template = Vue2Template;
static VUE3: Vue3Template = Vue3Template;

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Vue2, Framework::Vue3];

    /// The template implementing this framework.
    pub fn template(self) -> &'static dyn StoryTemplate {
        match self {
            Framework::Vue2 => &VUE2,
            Framework::Vue3 => &VUE3,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.template().id()
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vue2" | "2" => Ok(Framework::Vue2),
            "vue3" | "3" => Ok(Framework::Vue3),
            other => Err(format!(
                "unknown framework '{}', expected one of: vue2, vue3",
                other
            )),
        }
    }
}
