//! Abstractive text summarization over pretrained sequence-to-sequence models.
//!
//! # Overview
//! [`Summarizer`] loads a pretrained model (by default `facebook/bart-large-cnn`)
//! once, binds it to a compute device, and summarizes texts one at a time or
//! in order-preserving batches. Tokenization, decoding and device dispatch are
//! handled by rust-bert on top of libtorch.
//!
//! ```no_run
//! use summarizer::{GenerationOptions, Summarizer, Summary};
//!
//! let summarizer = Summarizer::default_model()?;
//! let text = "…a few paragraphs of text…";
//! match summarizer.summarize(text, &GenerationOptions::default()) {
//!     Summary::Success(summary) => println!("{summary}"),
//!     other => eprintln!("{other}"),
//! }
//! # Ok::<(), summarizer::InitializationError>(())
//! ```
//!
//! # Architecture
//! - [`model_ref`]: model identifiers and model file resolution
//! - [`device`]: device policy, resolved once at construction
//! - [`backend`]: the rust-bert generator
//! - [`summary`]: the per-text outcome

pub mod backend;
pub mod config;
pub mod device;

/// Error types and handling
pub mod error;

pub mod generator;
pub mod model_ref;

/// Generation parameters
pub mod options;

mod summarizer;
pub mod summary;

pub use backend::RustBertGenerator;
pub use config::SummarizerConfig;
pub use device::DeviceKind;
pub use error::{GenerationError, InitializationError};
pub use generator::SummaryGenerator;
pub use model_ref::{DEFAULT_MODEL, ModelArchitecture, ModelRef};
pub use options::GenerationOptions;
pub use summarizer::Summarizer;
pub use summary::Summary;
