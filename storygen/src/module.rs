//! Structured story module document and its formatter.
//!
//! Templates build a [`StoryModule`]; [`StoryModule::to_source`] is the only
//! place that turns it into JavaScript text.

use crate::controls::ControlsSchema;
use crate::error::{GenerateError, GenerateResult};
use crate::exports::StoryExport;
use std::fmt;

/// An ES module import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Default import binding.
    pub default: Option<String>,
    /// Named import bindings.
    pub named: Vec<String>,
    /// Module specifier.
    pub source: String,
}

impl Import {
    /// `import Binding from 'source';`
    pub fn default_import(binding: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            default: Some(binding.into()),
            named: Vec::new(),
            source: source.into(),
        }
    }

    /// `import { a, b } from 'source';`
    pub fn named<I, S>(names: I, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default: None,
            named: names.into_iter().map(Into::into).collect(),
            source: source.into(),
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bindings = Vec::new();
        if let Some(ref default) = self.default {
            bindings.push(default.clone());
        }
        if !self.named.is_empty() {
            bindings.push(format!("{{ {} }}", self.named.join(", ")));
        }

        if bindings.is_empty() {
            write!(f, "import {};", js_string(&self.source))
        } else {
            write!(
                f,
                "import {} from {};",
                bindings.join(", "),
                js_string(&self.source)
            )
        }
    }
}

/// The module's `export default { ... }` story metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultExport {
    /// Sidebar title, e.g. `Auto Generate Stories/forms/Input`.
    pub title: String,
    /// Component binding.
    pub component: String,
    /// Decorator expressions, verbatim.
    pub decorators: Vec<String>,
    /// Keys exposed in the controls panel.
    pub controls: ControlsSchema,
}

/// A complete story module.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryModule {
    /// Leading comment lines.
    pub header: Vec<String>,
    pub imports: Vec<Import>,
    /// Top-level helper function sources.
    pub helpers: Vec<String>,
    pub default_export: DefaultExport,
    /// Source of the `Template` class.
    pub template: String,
    pub exports: Vec<StoryExport>,
}

impl StoryModule {
    /// Names of the story exports, in order.
    pub fn export_names(&self) -> Vec<&str> {
        self.exports.iter().map(|e| e.name.as_str()).collect()
    }

    /// Serialize the module to JavaScript source.
    pub fn to_source(&self) -> GenerateResult<String> {
        let mut blocks: Vec<String> = Vec::new();

        let mut preamble: Vec<String> = self.header.clone();
        preamble.extend(self.imports.iter().map(ToString::to_string));
        if !preamble.is_empty() {
            blocks.push(preamble.join("\n"));
        }

        blocks.extend(self.helpers.iter().map(|h| h.trim_end().to_string()));
        blocks.push(self.format_default_export()?);
        blocks.push(self.template.trim_end().to_string());

        for export in &self.exports {
            blocks.push(format_story_export(export)?);
        }

        let mut source = blocks.join("\n\n");
        source.push('\n');
        Ok(source)
    }

    fn format_default_export(&self) -> GenerateResult<String> {
        let meta = &self.default_export;
        let include =
            serde_json::to_string(&meta.controls).map_err(|e| GenerateError::Controls {
                component: meta.component.clone(),
                source: e,
            })?;

        let mut out = String::new();
        out.push_str("export default {\n");
        out.push_str(&format!("  title: {},\n", js_string(&meta.title)));
        out.push_str(&format!("  component: {},\n", meta.component));
        out.push_str(&format!("  decorators: [{}],\n", meta.decorators.join(", ")));
        out.push_str("  parameters: {\n");
        out.push_str(&format!("    controls: {{ include: {} }},\n", include));
        out.push_str("  },\n");
        out.push_str("};");
        Ok(out)
    }
}

/// Format one `export const Name = new Template();` block.
fn format_story_export(export: &StoryExport) -> GenerateResult<String> {
    let args = if export.args.is_empty() {
        "{}".to_string()
    } else {
        serde_json::to_string_pretty(&export.args).map_err(|e| GenerateError::Serialize {
            story: export.name.clone(),
            source: e,
        })?
    };

    Ok(format!(
        "export const {name} = new Template();\n{name}.args = {args};",
        name = export.name,
        args = args
    ))
}

/// Quote a string as a single-quoted JavaScript literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
