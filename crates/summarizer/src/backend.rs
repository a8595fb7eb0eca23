use crate::error::{GenerationError, InitializationError};
use crate::generator::SummaryGenerator;
use crate::model_ref::{ModelArchitecture, ModelFiles};
use crate::options::GenerationOptions;
use rust_bert::RustBertError;
use rust_bert::bart::BartGenerator;
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::generation_utils::{
    GenerateConfig, GenerateOptions, GeneratedTextOutput, LanguageGenerator,
};
use rust_bert::resources::{LocalResource, ResourceProvider};
use rust_bert::t5::T5Generator;
use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use tch::Device;

/// Beam search settings the summarization checkpoints ship with.
const DEFAULT_NUM_BEAMS: i64 = 4;
const DEFAULT_LENGTH_PENALTY: f64 = 2.0;
const DEFAULT_NO_REPEAT_NGRAM_SIZE: i64 = 3;

enum Seq2SeqModel {
    Bart(BartGenerator),
    T5(T5Generator),
}

impl Seq2SeqModel {
    fn generate(
        &self,
        input: &[&str],
        options: GenerateOptions,
    ) -> Result<Vec<GeneratedTextOutput>, RustBertError> {
        match self {
            Seq2SeqModel::Bart(model) => model.generate(Some(input), Some(options)),
            Seq2SeqModel::T5(model) => model.generate(Some(input), Some(options)),
        }
    }
}

/// Summary generator backed by a rust-bert sequence-to-sequence model.
pub struct RustBertGenerator {
    model: Seq2SeqModel,
    architecture: ModelArchitecture,
    device: Device,
}

impl RustBertGenerator {
    /// Load the model from resolved files onto `device`.
    pub fn load(files: ModelFiles, device: Device) -> Result<Self, InitializationError> {
        let architecture = files.architecture;
        let model_type = match architecture {
            ModelArchitecture::Bart => ModelType::Bart,
            ModelArchitecture::T5 => ModelType::T5,
        };
        let merges_resource = files
            .merges
            .map(|path| Box::new(LocalResource::from(path)) as Box<dyn ResourceProvider + Send>);

        let generate_config = GenerateConfig {
            model_type,
            model_resource: ModelResource::Torch(Box::new(LocalResource::from(files.weights))),
            config_resource: Box::new(LocalResource::from(files.config)),
            vocab_resource: Box::new(LocalResource::from(files.vocab)),
            merges_resource,
            num_beams: DEFAULT_NUM_BEAMS,
            length_penalty: DEFAULT_LENGTH_PENALTY,
            no_repeat_ngram_size: DEFAULT_NO_REPEAT_NGRAM_SIZE,
            early_stopping: true,
            device,
            ..Default::default()
        };

        let model = match architecture {
            ModelArchitecture::Bart => Seq2SeqModel::Bart(BartGenerator::new(generate_config)?),
            ModelArchitecture::T5 => Seq2SeqModel::T5(T5Generator::new(generate_config)?),
        };

        Ok(Self {
            model,
            architecture,
            device,
        })
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn architecture(&self) -> ModelArchitecture {
        self.architecture
    }
}

fn generate_options(options: &GenerationOptions) -> GenerateOptions<'static> {
    GenerateOptions {
        min_length: Some(i64::from(options.min_length)),
        max_length: Some(i64::from(options.max_length)),
        do_sample: Some(options.do_sample),
        num_beams: options.num_beams.map(i64::from),
        temperature: options.temperature,
        top_k: options.top_k.map(i64::from),
        top_p: options.top_p,
        repetition_penalty: options.repetition_penalty,
        length_penalty: options.length_penalty,
        no_repeat_ngram_size: options.no_repeat_ngram_size.map(i64::from),
        early_stopping: options.early_stopping,
        num_return_sequences: Some(1),
        ..Default::default()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The first generated text, trimmed; blank output counts as no output.
fn first_summary(output: Vec<GeneratedTextOutput>) -> Result<String, GenerationError> {
    output
        .into_iter()
        .next()
        .map(|generated| generated.text.trim().to_string())
        .filter(|summary| !summary.is_empty())
        .ok_or(GenerationError::EmptyOutput)
}

impl SummaryGenerator for RustBertGenerator {
    fn generate(&self, text: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        let input: Cow<'_, str> = match self.architecture.input_prefix() {
            Some(prefix) => Cow::Owned(format!("{prefix}{text}")),
            None => Cow::Borrowed(text),
        };
        let generate_options = generate_options(options);

        // libtorch failures surface as panics inside tch.
        let output = panic::catch_unwind(AssertUnwindSafe(|| {
            self.model.generate(&[input.as_ref()], generate_options)
        }))
        .map_err(|payload| GenerationError::Panicked(panic_message(payload)))??;

        first_summary(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_options_onto_engine_options() {
        let opts = GenerationOptions::default()
            .with_max_length(120)
            .with_min_length(30)
            .with_sampling(true)
            .with_top_k(40);
        let mapped = generate_options(&opts);
        assert_eq!(mapped.max_length, Some(120));
        assert_eq!(mapped.min_length, Some(30));
        assert_eq!(mapped.do_sample, Some(true));
        assert_eq!(mapped.top_k, Some(40));
        assert_eq!(mapped.num_beams, None);
        assert_eq!(mapped.num_return_sequences, Some(1));
    }

    #[test]
    fn blank_engine_output_is_an_error() {
        let output = |text: &str| GeneratedTextOutput {
            text: text.to_string(),
            score: None,
        };
        assert_eq!(first_summary(vec![]), Err(GenerationError::EmptyOutput));
        assert_eq!(
            first_summary(vec![output("  \n ")]),
            Err(GenerationError::EmptyOutput)
        );
        assert_eq!(first_summary(vec![output("")]), Err(GenerationError::EmptyOutput));
        assert_eq!(
            first_summary(vec![output(" A summary. "), output("ignored")]),
            Ok("A summary.".to_string())
        );
    }

    #[test]
    fn extracts_panic_messages() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "bang");
        assert_eq!(panic_message(Box::new(7_u8)), "unknown panic");
    }
}
