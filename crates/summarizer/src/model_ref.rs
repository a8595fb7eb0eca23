//! Model identifiers and on-disk model files.
//!
//! A model is named either by a local directory or by a Hugging Face hub
//! repository. Hub files are downloaded into the standard hub cache on first
//! use and reused afterwards.

use crate::error::InitializationError;
use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Cache, Repo, RepoType};
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Model used when no identifier is given.
pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

/// Hub revision used when none is given.
pub const DEFAULT_REVISION: &str = "main";

const CONFIG_FILE: &str = "config.json";
const WEIGHTS_FILE: &str = "rust_model.ot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRef {
    LocalDir(PathBuf),
    HfRepo {
        repo: String,
        revision: Option<String>,
    },
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelRef::LocalDir(path) => write!(f, "file:{}", path.display()),
            ModelRef::HfRepo {
                repo,
                revision: Some(rev),
            } => write!(f, "hf:{repo}@{rev}"),
            ModelRef::HfRepo {
                repo,
                revision: None,
            } => write!(f, "hf:{repo}"),
        }
    }
}

pub fn parse_model_ref(input: &str) -> Result<ModelRef, InitializationError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(InitializationError::InvalidModelRef(
            "model cannot be empty".to_string(),
        ));
    }

    if let Some(rest) = raw.strip_prefix("hf:") {
        return parse_hub_ref(rest.trim());
    }

    if let Some(rest) = raw.strip_prefix("file:") {
        let path = rest.trim();
        if path.is_empty() {
            return Err(InitializationError::InvalidModelRef(
                "file: model refs must include a path".to_string(),
            ));
        }
        return Ok(ModelRef::LocalDir(expand_home(path)?));
    }

    if is_home_relative(raw) {
        return Ok(ModelRef::LocalDir(expand_home(raw)?));
    }

    let looks_like_path = is_windows_abs_path(raw)
        || raw.starts_with('.')
        || raw.starts_with('/')
        || raw.starts_with('~')
        || raw.contains('\\')
        || Path::new(raw).exists();
    if looks_like_path {
        return Ok(ModelRef::LocalDir(PathBuf::from(raw)));
    }

    if raw.contains('/') {
        return parse_hub_ref(raw);
    }

    Err(InitializationError::InvalidModelRef(format!(
        "'{raw}' is neither a local model directory nor a Hugging Face repo (<owner>/<name>)"
    )))
}

fn parse_hub_ref(raw: &str) -> Result<ModelRef, InitializationError> {
    let (repo, revision) = match raw.split_once('@') {
        Some((repo, rev)) => {
            let rev = rev.trim();
            if rev.is_empty() {
                return Err(InitializationError::InvalidModelRef(
                    "revision after '@' cannot be empty".to_string(),
                ));
            }
            (repo.trim(), Some(rev.to_string()))
        }
        None => (raw, None),
    };

    let mut parts = repo.split('/');
    let owner = parts.next().unwrap_or("").trim();
    let name = parts.next().unwrap_or("").trim();
    if owner.is_empty() || name.is_empty() || parts.next().is_some() {
        return Err(InitializationError::InvalidModelRef(
            "Hugging Face model repo must be formatted as <owner>/<name>".to_string(),
        ));
    }

    Ok(ModelRef::HfRepo {
        repo: repo.to_string(),
        revision,
    })
}

fn is_home_relative(raw: &str) -> bool {
    raw == "~" || raw.starts_with("~/") || raw.starts_with("~\\")
}

/// Replace a leading `~` with the user's home directory.
fn expand_home(raw: &str) -> Result<PathBuf, InitializationError> {
    if !is_home_relative(raw) {
        return Ok(PathBuf::from(raw));
    }
    let home = dirs::home_dir().ok_or_else(|| {
        InitializationError::InvalidModelRef(format!(
            "cannot expand '{raw}': home directory is unknown"
        ))
    })?;
    let rest = raw[1..].trim_start_matches(['/', '\\']);
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

fn is_windows_abs_path(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

/// Sequence-to-sequence architectures the summarizer can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelArchitecture {
    Bart,
    T5,
}

impl ModelArchitecture {
    pub fn from_model_type(model_type: &str) -> Result<Self, InitializationError> {
        match model_type {
            "bart" => Ok(ModelArchitecture::Bart),
            "t5" => Ok(ModelArchitecture::T5),
            other => Err(InitializationError::UnsupportedModel(format!(
                "model_type '{other}' is not a supported summarization architecture (bart, t5)"
            ))),
        }
    }

    pub(crate) fn vocab_file(self) -> &'static str {
        match self {
            ModelArchitecture::Bart => "vocab.json",
            ModelArchitecture::T5 => "spiece.model",
        }
    }

    pub(crate) fn merges_file(self) -> Option<&'static str> {
        match self {
            ModelArchitecture::Bart => Some("merges.txt"),
            ModelArchitecture::T5 => None,
        }
    }

    /// Task prefix prepended to the input text.
    pub fn input_prefix(self) -> Option<&'static str> {
        match self {
            ModelArchitecture::Bart => None,
            ModelArchitecture::T5 => Some("summarize: "),
        }
    }
}

#[derive(Deserialize)]
struct ModelTypeConfig {
    model_type: Option<String>,
}

/// Paths of every file needed to load a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub architecture: ModelArchitecture,
    pub config: PathBuf,
    pub vocab: PathBuf,
    pub merges: Option<PathBuf>,
    pub weights: PathBuf,
}

/// Hub download settings.
#[derive(Debug, Clone, Default)]
pub struct HubSettings {
    /// Overrides the revision carried by the model reference.
    pub revision: Option<String>,
    /// Overrides the hub cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Show download progress bars.
    pub progress: bool,
}

enum FileSource {
    Local(PathBuf),
    Hub(ApiRepo),
}

impl FileSource {
    fn fetch(&self, name: &str) -> Result<PathBuf, InitializationError> {
        match self {
            FileSource::Local(dir) => {
                let path = dir.join(name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(InitializationError::MissingFile(path.display().to_string()))
                }
            }
            FileSource::Hub(repo) => {
                debug!("fetching {name} from the Hugging Face hub");
                repo.get(name)
                    .map_err(|e| InitializationError::Download(format!("{name}: {e}")))
            }
        }
    }
}

/// Locate (and download if needed) every file the model needs.
pub fn resolve_model_files(
    model: &ModelRef,
    hub: &HubSettings,
) -> Result<ModelFiles, InitializationError> {
    let source = match model {
        ModelRef::LocalDir(dir) => {
            if !dir.is_dir() {
                return Err(InitializationError::InvalidModelRef(format!(
                    "model directory does not exist: {}",
                    dir.display()
                )));
            }
            FileSource::Local(dir.clone())
        }
        ModelRef::HfRepo { repo, revision } => {
            let revision = hub
                .revision
                .clone()
                .or_else(|| revision.clone())
                .unwrap_or_else(|| DEFAULT_REVISION.to_string());
            let mut builder = ApiBuilder::from_cache(Cache::from_env()).with_progress(hub.progress);
            if let Some(cache_dir) = &hub.cache_dir {
                builder = builder.with_cache_dir(cache_dir.clone());
            }
            let api = builder
                .build()
                .map_err(|e| InitializationError::Download(e.to_string()))?;
            FileSource::Hub(api.repo(Repo::with_revision(
                repo.clone(),
                RepoType::Model,
                revision,
            )))
        }
    };

    let config = source.fetch(CONFIG_FILE)?;
    let architecture = read_architecture(&config)?;
    let vocab = source.fetch(architecture.vocab_file())?;
    let merges = architecture
        .merges_file()
        .map(|name| source.fetch(name))
        .transpose()?;
    let weights = source.fetch(WEIGHTS_FILE)?;

    Ok(ModelFiles {
        architecture,
        config,
        vocab,
        merges,
        weights,
    })
}

fn read_architecture(config_path: &Path) -> Result<ModelArchitecture, InitializationError> {
    let contents = fs::read_to_string(config_path)?;
    let cfg: ModelTypeConfig = serde_json::from_str(&contents)?;
    let model_type = cfg.model_type.ok_or_else(|| {
        InitializationError::UnsupportedModel(format!(
            "{} does not declare a model_type",
            config_path.display()
        ))
    })?;
    ModelArchitecture::from_model_type(&model_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_owner_and_name() {
        let parsed = parse_model_ref("facebook/bart-large-cnn").unwrap();
        assert_eq!(
            parsed,
            ModelRef::HfRepo {
                repo: "facebook/bart-large-cnn".to_string(),
                revision: None,
            }
        );
    }

    #[test]
    fn parse_hf_prefix_with_revision() {
        let parsed = parse_model_ref("hf:sshleifer/distilbart-cnn-12-6@v1.0").unwrap();
        assert_eq!(
            parsed,
            ModelRef::HfRepo {
                repo: "sshleifer/distilbart-cnn-12-6".to_string(),
                revision: Some("v1.0".to_string()),
            }
        );
    }

    #[test]
    fn parse_file_prefix() {
        let parsed = parse_model_ref("file:models/bart").unwrap();
        assert_eq!(parsed, ModelRef::LocalDir(PathBuf::from("models/bart")));
    }

    #[test]
    fn parse_relative_and_absolute_paths() {
        assert_eq!(
            parse_model_ref("./bart").unwrap(),
            ModelRef::LocalDir(PathBuf::from("./bart"))
        );
        assert_eq!(
            parse_model_ref("/opt/models/bart").unwrap(),
            ModelRef::LocalDir(PathBuf::from("/opt/models/bart"))
        );
        assert_eq!(
            parse_model_ref("C:\\models\\bart").unwrap(),
            ModelRef::LocalDir(PathBuf::from("C:\\models\\bart"))
        );
    }

    #[test]
    fn expands_home_directory() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            parse_model_ref("~/models/bart").unwrap(),
            ModelRef::LocalDir(home.join("models/bart"))
        );
        assert_eq!(
            parse_model_ref("file:~/models/t5").unwrap(),
            ModelRef::LocalDir(home.join("models/t5"))
        );
        assert_eq!(parse_model_ref("~").unwrap(), ModelRef::LocalDir(home));
    }

    #[test]
    fn rejects_malformed_refs() {
        assert!(parse_model_ref("").is_err());
        assert!(parse_model_ref("   ").is_err());
        assert!(parse_model_ref("bart").is_err());
        assert!(parse_model_ref("file:").is_err());
        assert!(parse_model_ref("hf:facebook").is_err());
        assert!(parse_model_ref("facebook/bart-large-cnn@").is_err());
        assert!(parse_model_ref("a/b/c").is_err());
    }

    #[test]
    fn display_is_canonical() {
        let model = parse_model_ref("facebook/bart-large-cnn@main").unwrap();
        assert_eq!(model.to_string(), "hf:facebook/bart-large-cnn@main");
        assert_eq!(parse_model_ref(&model.to_string()).unwrap(), model);
    }

    #[test]
    fn architecture_from_model_type() {
        assert_eq!(
            ModelArchitecture::from_model_type("bart").unwrap(),
            ModelArchitecture::Bart
        );
        assert_eq!(
            ModelArchitecture::from_model_type("t5").unwrap(),
            ModelArchitecture::T5
        );
        assert!(matches!(
            ModelArchitecture::from_model_type("gpt2"),
            Err(InitializationError::UnsupportedModel(_))
        ));
        assert_eq!(ModelArchitecture::T5.input_prefix(), Some("summarize: "));
        assert_eq!(ModelArchitecture::Bart.merges_file(), Some("merges.txt"));
    }
}
