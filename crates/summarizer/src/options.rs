//! Generation parameters.
//!
//! [`GenerationOptions`] is passed unchanged to the summary generator on every
//! call. The three length/sampling fields always carry a value; the remaining
//! decoding knobs are optional and fall back to the engine's defaults when
//! unset.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default upper bound on summary length, in tokens.
pub const DEFAULT_MAX_LENGTH: u32 = 150;

/// Default lower bound on summary length, in tokens.
pub const DEFAULT_MIN_LENGTH: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct GenerationOptions {
    /// Maximum summary length.
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    /// Minimum summary length.
    #[serde(default = "default_min_length")]
    pub min_length: u32,

    /// Stochastic decoding when true, deterministic beam search otherwise.
    #[serde(default)]
    pub do_sample: bool,

    /// Beam count for beam search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_beams: Option<u32>,

    /// Sampling temperature; only used with `do_sample`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Top-k sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Top-p (nucleus) sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Penalty applied to tokens that were already generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,

    /// Exponential length penalty applied to beam scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_penalty: Option<f64>,

    /// Forbid repeating n-grams of this size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_repeat_ngram_size: Option<u32>,

    /// Stop beam search once every beam has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_stopping: Option<bool>,
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

fn default_min_length() -> u32 {
    DEFAULT_MIN_LENGTH
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            do_sample: false,
            num_beams: None,
            temperature: None,
            top_k: None,
            top_p: None,
            repetition_penalty: None,
            length_penalty: None,
            no_repeat_ngram_size: None,
            early_stopping: None,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_min_length(mut self, min_length: u32) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_sampling(mut self, do_sample: bool) -> Self {
        self.do_sample = do_sample;
        self
    }

    pub fn with_num_beams(mut self, num_beams: u32) -> Self {
        self.num_beams = Some(num_beams);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_repetition_penalty(mut self, repetition_penalty: f64) -> Self {
        self.repetition_penalty = Some(repetition_penalty);
        self
    }

    pub fn with_length_penalty(mut self, length_penalty: f64) -> Self {
        self.length_penalty = Some(length_penalty);
        self
    }

    pub fn with_no_repeat_ngram_size(mut self, size: u32) -> Self {
        self.no_repeat_ngram_size = Some(size);
        self
    }

    /// Whether repeated calls with the same input should yield the same output.
    pub fn is_deterministic(&self) -> bool {
        !self.do_sample
    }
}
