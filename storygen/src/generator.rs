//! Story generation for a single component.

use crate::controls::{self, ControlsSchema};
use crate::error::{GenerateError, GenerateResult};
use crate::exports::{self, StoryExport};
use crate::module::StoryModule;
use crate::paths::{self, ComponentDescriptor};
use crate::spec::StorySpec;
use crate::template::{Framework, RenderContext};
use std::path::Path;

/// Default leading segment of story titles.
pub const DEFAULT_TITLE_PREFIX: &str = "Auto Generate Stories";

/// Default suffix appended to component import bindings.
pub const DEFAULT_COMPONENT_SUFFIX: &str = "Component";

/// Options shared by every component in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub framework: Framework,
    pub title_prefix: String,
    pub component_suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            component_suffix: DEFAULT_COMPONENT_SUFFIX.to_string(),
        }
    }
}

/// A rendered story module and its source text.
#[derive(Debug, Clone)]
pub struct RenderedStory {
    pub module: StoryModule,
    pub content: String,
}

impl RenderedStory {
    pub fn controls(&self) -> &ControlsSchema {
        &self.module.default_export.controls
    }

    pub fn exports(&self) -> &[StoryExport] {
        &self.module.exports
    }
}

/// Renders story modules with one fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct StoryGenerator {
    options: GeneratorOptions,
}

impl StoryGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generator for `framework` with default naming.
    pub fn for_framework(framework: Framework) -> Self {
        Self::new(GeneratorOptions {
            framework,
            ..Default::default()
        })
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Describe a component found under `views_root`.
    pub fn describe(&self, views_root: &Path, source_path: &Path) -> ComponentDescriptor {
        ComponentDescriptor::new(views_root, source_path, &self.options.component_suffix)
    }

    /// Describe a component whose base name was derived by the caller.
    pub fn describe_as(
        &self,
        views_root: &Path,
        source_path: &Path,
        base: &str,
    ) -> ComponentDescriptor {
        ComponentDescriptor::with_base_name(
            views_root,
            source_path,
            base,
            &self.options.component_suffix,
        )
    }

    /// Render the story module for `descriptor`, to be written into
    /// `output_dir`.
    pub fn generate(
        &self,
        descriptor: &ComponentDescriptor,
        output_dir: &Path,
        spec: &StorySpec,
    ) -> GenerateResult<RenderedStory> {
        let import_path = paths::import_path_from(output_dir, &descriptor.source_path)
            .map_err(|source| GenerateError::ResolvePath {
                path: descriptor.source_path.clone(),
                source,
            })?;
        let controls = controls::extract(&spec.examples);
        let exports = exports::synthesize_all(&spec.examples);

        let template = self.options.framework.template();
        let module = template.build_module(&RenderContext {
            descriptor,
            import_path: &import_path,
            controls: &controls,
            exports: &exports,
            title_prefix: &self.options.title_prefix,
        });
        let content = module.to_source()?;

        tracing::debug!(
            component = %descriptor.name,
            framework = template.id(),
            stories = module.exports.len(),
            controls = controls.len(),
            "rendered story module"
        );

        Ok(RenderedStory { module, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::DEFAULT_EXPORT_NAME;
    use serde_json::json;
    use std::path::PathBuf;

    fn button() -> (PathBuf, PathBuf) {
        (
            PathBuf::from("/p/views"),
            PathBuf::from("/p/views/Button.vue"),
        )
    }

    #[test]
    fn test_generate_end_to_end_button() {
        let (root, source) = button();
        let spec = StorySpec::from_json_str(
            r#"[{ "title": "Big", "props": { "label": "Hi" }, "url": "/big" }]"#,
        )
        .unwrap();

        let generator = StoryGenerator::default();
        let descriptor = generator.describe(&root, &source);
        let story = generator
            .generate(&descriptor, Path::new("/p/stories"), &spec)
            .unwrap();

        assert_eq!(story.controls().to_vec(), vec!["props.label", "url"]);
        assert_eq!(story.module.export_names(), vec!["Big"]);
        assert_eq!(
            serde_json::Value::Object(story.exports()[0].args.clone()),
            json!({ "props.label": "Hi", "url": "/big" })
        );
        assert!(story
            .content
            .contains("import ButtonComponent from '../views/Button.vue';"));
        assert!(story
            .content
            .contains("controls: { include: [\"props.label\",\"url\"] },"));
    }

    #[test]
    fn test_generate_empty_spec_yields_default_for_every_framework() {
        let (root, source) = button();
        for framework in Framework::ALL {
            let generator = StoryGenerator::for_framework(framework);
            let descriptor = generator.describe(&root, &source);
            let story = generator
                .generate(&descriptor, Path::new("/p/stories"), &StorySpec::default())
                .unwrap();

            assert_eq!(story.module.export_names(), vec![DEFAULT_EXPORT_NAME]);
            assert!(story.exports()[0].args.is_empty());
            assert!(story
                .content
                .contains("export const Default = new Template();\nDefault.args = {};"));
            assert!(story.controls().is_empty());
        }
    }

    #[test]
    fn test_generate_uses_custom_prefix_and_suffix() {
        let generator = StoryGenerator::new(GeneratorOptions {
            framework: Framework::Vue2,
            title_prefix: "Widgets".to_string(),
            component_suffix: "View".to_string(),
        });
        let (root, source) = button();
        let descriptor = generator.describe(&root, &source);
        let story = generator
            .generate(&descriptor, Path::new("/p/stories"), &StorySpec::default())
            .unwrap();

        assert!(story.content.contains("title: 'Widgets/Button',"));
        assert!(story.content.contains("component: ButtonView,"));
        assert!(!story.content.contains("vue-router"));
    }
}
