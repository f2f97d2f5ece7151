//! # storygen
//!
//! Generates Storybook story modules for Vue single-file components.
//!
//! For every `Button.vue` the generator emits a `Button.stories.js` that
//! imports the component, declares its controls and exports one story per
//! example found in the optional `Button.stories.json` sidecar.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storygen::{Framework, StoryGenerator, StorySpec};
//! use std::path::Path;
//!
//! let generator = StoryGenerator::for_framework(Framework::Vue3);
//! let descriptor = generator.describe(Path::new("src/views"), Path::new("src/views/Button.vue"));
//! let spec = StorySpec::load_or_empty(Path::new("src/views/Button.stories.json"));
//! let story = generator.generate(&descriptor, Path::new("stories"), &spec)?;
//! println!("{}", story.content);
//! ```
//!
//! ## Namespaced args
//!
//! | Key | Routed to |
//! |-----|-----------|
//! | `props.<name>` | component prop `<name>` |
//! | `window.<name>` | `window.<name>` |
//! | `localStorage.<name>` | `localStorage.setItem('<name>', …)` |
//! | `sessionStorage.<name>` | `sessionStorage.setItem('<name>', …)` |
//! | `url` | `router.replace(url)` |
//!
//! ## Modules
//!
//! - [`namespace`] - namespaced key codec and environment effects
//! - [`spec`] - sidecar story specifications
//! - [`controls`] - controls schema extraction
//! - [`exports`] - story export synthesis
//! - [`paths`] - import and title paths
//! - [`module`] - module document and formatter
//! - [`template`] - Vue 2 and Vue 3 templates
//! - [`generator`] - per-component pipeline

pub mod controls;
pub mod error;
pub mod exports;
pub mod generator;
pub mod module;
pub mod namespace;
pub mod paths;
pub mod spec;
pub mod template;

pub use controls::ControlsSchema;
pub use error::{GenerateError, GenerateResult, SpecError};
pub use exports::StoryExport;
pub use generator::{GeneratorOptions, RenderedStory, StoryGenerator};
pub use module::StoryModule;
pub use namespace::{Args, EnvironmentEffects, Namespace};
pub use paths::ComponentDescriptor;
pub use spec::{StoryExample, StorySpec};
pub use template::{Framework, StoryTemplate};
