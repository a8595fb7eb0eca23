use crate::backend::RustBertGenerator;
use crate::config::SummarizerConfig;
use crate::device::device_label;
use crate::error::{GenerationError, InitializationError};
use crate::generator::SummaryGenerator;
use crate::model_ref::{ModelArchitecture, parse_model_ref, resolve_model_files};
use crate::options::GenerationOptions;
use crate::summary::{MIN_INPUT_CHARS, Summary, is_blank};
use log::{debug, error, info, warn};
use tch::Device;

/// Abstractive summarizer over a pretrained model.
///
/// The generator is bound once at construction and never mutated afterwards,
/// so the summarizer is `Send`/`Sync` whenever `G` is.
pub struct Summarizer<G = RustBertGenerator> {
    generator: G,
    defaults: GenerationOptions,
}

impl Summarizer<RustBertGenerator> {
    /// Load `model` (a hub repo or a local directory) on the automatically
    /// selected device.
    pub fn new(model: &str) -> Result<Self, InitializationError> {
        Self::from_config(SummarizerConfig::for_model(model))
    }

    /// Load the default model, `facebook/bart-large-cnn`.
    pub fn default_model() -> Result<Self, InitializationError> {
        Self::from_config(SummarizerConfig::default())
    }

    /// Build from `cfg`, logging the error if initialization fails.
    pub fn from_config(cfg: SummarizerConfig) -> Result<Self, InitializationError> {
        Self::try_from_config(&cfg)
            .inspect_err(|err| error!("Error initializing summarizer: {}", err))
    }

    /// Build from `cfg` without logging failures, for callers that report
    /// the error themselves.
    pub fn try_from_config(cfg: &SummarizerConfig) -> Result<Self, InitializationError> {
        let model = parse_model_ref(&cfg.model)?;
        let device = cfg.device.resolve(cfg.device_index)?;
        info!(
            "Loading summarization model {} on {} (policy: {})",
            model,
            device_label(device),
            cfg.device
        );

        let files = resolve_model_files(&model, &cfg.hub_settings())?;
        debug!("Resolved model files: {:?}", files);
        let generator = RustBertGenerator::load(files, device)?;
        info!(
            "Model {} ready ({:?})",
            model,
            generator.architecture()
        );

        Ok(Self {
            generator,
            defaults: cfg.options.clone(),
        })
    }

    /// Device the model was bound to.
    pub fn device(&self) -> Device {
        self.generator.device()
    }

    pub fn architecture(&self) -> ModelArchitecture {
        self.generator.architecture()
    }
}

impl<G: SummaryGenerator> Summarizer<G> {
    /// Wrap an already constructed generator.
    pub fn with_generator(generator: G) -> Self {
        Self {
            generator,
            defaults: GenerationOptions::default(),
        }
    }

    /// Replace the options used by [`summarize_default`](Self::summarize_default).
    pub fn with_default_options(mut self, options: GenerationOptions) -> Self {
        self.defaults = options;
        self
    }

    pub fn default_options(&self) -> &GenerationOptions {
        &self.defaults
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Summarize one text.
    ///
    /// Blank input yields [`Summary::Empty`], input under 100 characters
    /// yields [`Summary::TooShort`], and generation failures are returned as
    /// [`Summary::Failed`] rather than as an error.
    pub fn summarize(&self, text: &str, options: &GenerationOptions) -> Summary {
        if is_blank(text) {
            return Summary::Empty;
        }
        if text.chars().count() < MIN_INPUT_CHARS {
            return Summary::TooShort;
        }

        match self.generator.generate(text, options) {
            Ok(summary) if summary.trim().is_empty() => {
                warn!("Summarization failed: {}", GenerationError::EmptyOutput);
                Summary::Failed(GenerationError::EmptyOutput)
            }
            Ok(summary) => Summary::Success(summary),
            Err(err) => {
                warn!("Summarization failed: {}", err);
                Summary::Failed(err)
            }
        }
    }

    /// Summarize one text with the configured default options.
    pub fn summarize_default(&self, text: &str) -> Summary {
        self.summarize(text, &self.defaults)
    }

    /// Summarize each text in order. Item `i` of the result belongs to item
    /// `i` of the input; a failure in one item does not affect the others.
    pub fn batch_summarize<S: AsRef<str>>(
        &self,
        texts: &[S],
        options: &GenerationOptions,
    ) -> Vec<Summary> {
        texts
            .iter()
            .map(|text| self.summarize(text.as_ref(), options))
            .collect()
    }

    pub fn batch_summarize_default<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Summary> {
        self.batch_summarize(texts, &self.defaults)
    }
}
