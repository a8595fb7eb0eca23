use crate::device::DeviceKind;
use crate::error::InitializationError;
use crate::model_ref::{DEFAULT_MODEL, HubSettings};
use crate::options::GenerationOptions;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SummarizerConfig {
    /// Model reference. Accepts local directories (`file:<path>` or a path)
    /// and Hugging Face repos (`<owner>/<name>[@<revision>]`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Hub revision; overrides any `@<revision>` in `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Compute device policy.
    #[serde(default)]
    pub device: DeviceKind,
    /// CUDA ordinal when `device` is `cuda` or `auto`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_index: Option<usize>,
    /// Hugging Face hub cache directory. Defaults to the hub's own location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Show download progress bars while fetching model files.
    #[serde(default)]
    pub progress: bool,
    /// Generation options applied when the caller does not pass its own.
    #[serde(default)]
    pub options: GenerationOptions,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            revision: None,
            device: DeviceKind::default(),
            device_index: None,
            cache_dir: None,
            progress: false,
            options: GenerationOptions::default(),
        }
    }
}

impl SummarizerConfig {
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn from_json(cfg: &str) -> Result<Self, InitializationError> {
        Ok(serde_json::from_str(cfg)?)
    }

    pub fn from_toml_str(cfg: &str) -> Result<Self, InitializationError> {
        Ok(toml::from_str(cfg)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, InitializationError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// JSON schema of the configuration, pretty printed.
    pub fn config_schema() -> String {
        let schema = schema_for!(SummarizerConfig);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }

    pub(crate) fn hub_settings(&self) -> HubSettings {
        HubSettings {
            revision: self.revision.clone(),
            cache_dir: self.cache_dir.clone(),
            progress: self.progress,
        }
    }
}
