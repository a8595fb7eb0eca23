use thiserror::Error;

/// Errors raised while building a [`Summarizer`](crate::Summarizer).
///
/// These are fatal for the caller: a summarizer that failed to initialize is
/// never handed out.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// The model identifier could not be parsed.
    #[error("Invalid model reference: {0}")]
    InvalidModelRef(String),

    /// A model file could not be fetched from the Hugging Face hub.
    #[error("Model download failed: {0}")]
    Download(String),

    /// A file the architecture needs is absent from a local model directory.
    #[error("Missing model file: {0}")]
    MissingFile(String),

    /// The model's `config.json` names an architecture we cannot drive.
    #[error("Unsupported model type: {0}")]
    UnsupportedModel(String),

    /// The configured compute device cannot be used on this host.
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The inference engine refused to build the model.
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Configuration values are inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML Error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<rust_bert::RustBertError> for InitializationError {
    fn from(err: rust_bert::RustBertError) -> Self {
        InitializationError::ModelLoad(err.to_string())
    }
}

/// Errors raised by a single generation call.
///
/// The facade never returns these as `Err`; they end up inside
/// [`Summary::Failed`](crate::Summary::Failed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The engine reported an error.
    #[error("{0}")]
    Backend(String),

    /// The engine panicked while generating.
    #[error("generation panicked: {0}")]
    Panicked(String),

    /// The engine returned no summary for the input.
    #[error("no summary was returned by the model")]
    EmptyOutput,
}

impl From<rust_bert::RustBertError> for GenerationError {
    fn from(err: rust_bert::RustBertError) -> Self {
        GenerationError::Backend(err.to_string())
    }
}
