//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `storygen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use storygen::generator::{DEFAULT_COMPONENT_SUFFIX, DEFAULT_TITLE_PREFIX};
use storygen::{Framework, GeneratorOptions};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "storygen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Component discovery.
    pub input: InputConfig,

    /// Story output.
    pub output: OutputConfig,

    /// Template selection.
    pub template: TemplateConfig,
}

/// Component discovery configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Extension identifying component files, without the leading dot.
    pub component_extension: String,

    /// Extension of sidecar story specs, replacing the component extension.
    pub spec_extension: String,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for generated stories.
    pub dir: PathBuf,

    /// Extension of generated story files.
    pub extension: String,

    /// Leading segment of every story title.
    pub title_prefix: String,

    /// Suffix appended to component import bindings.
    pub component_suffix: String,
}

/// Template configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Target framework.
    pub framework: Framework,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            component_extension: "vue".to_string(),
            spec_extension: "stories.json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./stories"),
            extension: "stories.js".to_string(),
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            component_suffix: DEFAULT_COMPONENT_SUFFIX.to_string(),
        }
    }
}

impl Config {
    /// Reject values that would make discovery or output ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extensions = [
            ("input.component_extension", &self.input.component_extension),
            ("input.spec_extension", &self.input.spec_extension),
            ("output.extension", &self.output.extension),
        ];
        for (key, value) in extensions {
            if value.is_empty() {
                return Err(ConfigError::invalid_value(key, "must not be empty"));
            }
            if value.starts_with('.') {
                return Err(ConfigError::invalid_value(
                    key,
                    "must not start with '.'",
                ));
            }
        }

        if self.input.spec_extension == self.input.component_extension {
            return Err(ConfigError::invalid_value(
                "input.spec_extension",
                "must differ from input.component_extension",
            ));
        }

        Ok(())
    }

    /// Generator options derived from this configuration.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            framework: self.template.framework,
            title_prefix: self.output.title_prefix.clone(),
            component_suffix: self.output.component_suffix.clone(),
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// With no path, `storygen.toml` in the working directory is used when it
    /// exists and defaults otherwise. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path.to_path_buf()).into());
                }
                path.to_path_buf()
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILENAME);
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&content, &config_path)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration text; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(framework) = args.framework {
            config.template.framework = framework;
        }

        config
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Framework override.
    pub framework: Option<Framework>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.component_extension, "vue");
        assert_eq!(config.input.spec_extension, "stories.json");
        assert_eq!(config.output.dir, PathBuf::from("./stories"));
        assert_eq!(config.output.extension, "stories.js");
        assert_eq!(config.output.title_prefix, "Auto Generate Stories");
        assert_eq!(config.output.component_suffix, "Component");
        assert_eq!(config.template.framework, Framework::Vue3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_cli_args_overrides() {
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            framework: Some(Framework::Vue2),
        };

        let merged = ConfigManager::merge_cli_args(Config::default(), &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.template.framework, Framework::Vue2);
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = ConfigManager::parse(
            "[template]\nframework = \"vue2\"\n",
            Path::new("storygen.toml"),
        )
        .unwrap();

        let merged = ConfigManager::merge_cli_args(config.clone(), &CliArgs::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[input]
component_extension = "vue"
spec_extension = "story.json"

[output]
dir = "./generated/stories"
extension = "stories.ts"
title_prefix = "Components"
component_suffix = "View"

[template]
framework = "vue2"
"#;

        let config = ConfigManager::parse(toml, Path::new("storygen.toml")).unwrap();
        assert_eq!(config.input.spec_extension, "story.json");
        assert_eq!(config.output.dir, PathBuf::from("./generated/stories"));
        assert_eq!(config.output.extension, "stories.ts");
        assert_eq!(config.template.framework, Framework::Vue2);

        let options = config.generator_options();
        assert_eq!(options.title_prefix, "Components");
        assert_eq!(options.component_suffix, "View");
    }

    #[test]
    fn test_parse_rejects_unknown_framework() {
        let err = ConfigManager::parse("[template]\nframework = \"react\"\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_and_dotted_extensions() {
        let mut config = Config::default();
        config.output.extension = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = Config::default();
        config.input.component_extension = ".vue".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.spec_extension = "vue".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ConfigManager::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storygen.toml");
        std::fs::write(&path, "[output]\ndir = \"out\"\n").unwrap();

        let config = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.extension, "stories.js");
    }
}
