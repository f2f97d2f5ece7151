//! Component tree walker.
//!
//! Walks the views directory, renders a story module for every component
//! file and mirrors the directory layout under the output root. A failure on
//! one entry is logged and recorded; the walk always continues.

use crate::config::Config;
use crate::error::{CliResult, ScanError};
use crate::writer::{FileWriter, WriteResult};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use storygen::{StoryGenerator, StorySpec};
use walkdir::WalkDir;

/// A component whose story module was rendered.
#[derive(Debug, Clone)]
pub struct GeneratedStory {
    /// Component source file.
    pub component: PathBuf,
    /// Story module path.
    pub output: PathBuf,
    /// Export names, in order.
    pub stories: Vec<String>,
    /// What the writer did with the module.
    pub result: WriteResult,
}

/// An entry the walk could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a full walk.
#[derive(Debug, Clone, Default)]
pub struct WalkSummary {
    pub generated: Vec<GeneratedStory>,
    pub skipped: Vec<SkippedEntry>,
}

impl WalkSummary {
    /// Stories a check found missing or stale.
    pub fn out_of_date(&self) -> impl Iterator<Item = &GeneratedStory> {
        self.generated.iter().filter(|s| s.result.is_out_of_date())
    }

    fn skip(&mut self, path: PathBuf, reason: impl ToString) {
        let reason = reason.to_string();
        tracing::warn!(path = %path.display(), %reason, "skipping entry");
        self.skipped.push(SkippedEntry { path, reason });
    }
}

/// Recursive story generator over a views directory.
#[derive(Debug)]
pub struct TreeWalker {
    source_root: PathBuf,
    output_root: PathBuf,
    generator: StoryGenerator,
    writer: FileWriter,
    component_extension: String,
    spec_extension: String,
    output_extension: String,
    filter: Option<glob::Pattern>,
}

impl TreeWalker {
    /// Walker with default extensions (`vue`, `stories.json`, `stories.js`).
    pub fn new(
        source_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        generator: StoryGenerator,
    ) -> Self {
        let defaults = Config::default();
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            generator,
            writer: FileWriter::default(),
            component_extension: defaults.input.component_extension,
            spec_extension: defaults.input.spec_extension,
            output_extension: defaults.output.extension,
            filter: None,
        }
    }

    /// Walker configured entirely from `config`.
    pub fn from_config(source_root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(
            source_root,
            config.output.dir.clone(),
            StoryGenerator::new(config.generator_options()),
        )
        .with_extensions(
            &config.input.component_extension,
            &config.input.spec_extension,
            &config.output.extension,
        )
    }

    /// Set component, sidecar spec and output extensions (no leading dot).
    pub fn with_extensions(mut self, component: &str, spec: &str, output: &str) -> Self {
        self.component_extension = component.to_string();
        self.spec_extension = spec.to_string();
        self.output_extension = output.to_string();
        self
    }

    pub fn with_writer(mut self, writer: FileWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Only process components whose root-relative path matches `pattern`.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Walk the whole tree.
    ///
    /// Fails only when the source root itself is unusable or the output root
    /// cannot be created.
    pub fn walk(&self) -> CliResult<WalkSummary> {
        if !self.source_root.exists() {
            return Err(ScanError::not_found(self.source_root.clone()).into());
        }
        if !self.source_root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: self.source_root.clone(),
            }
            .into());
        }
        self.writer.ensure_dir(&self.output_root)?;

        let mut summary = WalkSummary::default();
        let entries = WalkDir::new(&self.source_root)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.source_root.clone());
                    summary.skip(path, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(base) = self.component_base_name(entry.file_name()) else {
                continue;
            };

            let path = entry.path();
            if !self.matches_filter(path) {
                tracing::debug!(path = %path.display(), "filtered out");
                continue;
            }

            match self.process(path, &base) {
                Ok(story) => summary.generated.push(story),
                Err(e) => summary.skip(path.to_path_buf(), e),
            }
        }

        Ok(summary)
    }

    /// Base name of a component file, or `None` for other files.
    fn component_base_name(&self, file_name: &OsStr) -> Option<String> {
        let name = file_name.to_str()?;
        let base = name.strip_suffix(self.component_extension.as_str())?.strip_suffix('.')?;
        if base.is_empty() {
            None
        } else {
            Some(base.to_string())
        }
    }

    fn matches_filter(&self, path: &Path) -> bool {
        match self.filter {
            Some(ref pattern) => {
                let relative = path.strip_prefix(&self.source_root).unwrap_or(path);
                pattern.matches_path(relative)
            }
            None => true,
        }
    }

    /// Render and emit the story module for one component.
    fn process(&self, path: &Path, base: &str) -> CliResult<GeneratedStory> {
        let source_dir = path.parent().unwrap_or(&self.source_root);
        let relative_dir = source_dir
            .strip_prefix(&self.source_root)
            .unwrap_or_else(|_| Path::new(""));
        let output_dir = self.output_root.join(relative_dir);
        let output_path = output_dir.join(format!("{}.{}", base, self.output_extension));

        let spec_path = source_dir.join(format!("{}.{}", base, self.spec_extension));
        let spec = StorySpec::load_or_empty(&spec_path);

        let descriptor = self.generator.describe_as(&self.source_root, path, base);
        let story = self.generator.generate(&descriptor, &output_dir, &spec)?;

        for export in story.exports() {
            let effects = export.effects();
            if !effects.is_empty() {
                tracing::debug!(
                    story = %export.name,
                    assignments = effects.assignment_count(),
                    navigate_to = effects.navigate_to.as_deref().unwrap_or(""),
                    "story applies environment effects"
                );
            }
        }

        let result = self.writer.write(&output_path, &story.content)?;

        Ok(GeneratedStory {
            component: path.to_path_buf(),
            output: output_path,
            stories: story
                .module
                .export_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            result,
        })
    }
}

/// Resolve `path` against the working directory when relative.
///
/// Import paths are computed lexically, so both roots must be absolute.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
