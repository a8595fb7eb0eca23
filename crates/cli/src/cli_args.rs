use clap::{Parser, Subcommand};
use std::path::PathBuf;
use summarizer::DeviceKind;

/// Command line arguments for the summarizer CLI
#[derive(Parser, Debug)]
#[clap(
    name = "summarize",
    about = "Summarize text with a pretrained sequence-to-sequence model",
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files to summarize, in order. Without files or --stdin a built-in
    /// sample paragraph is summarized.
    #[arg()]
    pub files: Vec<PathBuf>,

    /// Summarize text read from standard input
    #[arg(long, conflicts_with = "files")]
    pub stdin: bool,

    /// Model reference: <owner>/<name>[@<revision>] or a local directory
    #[arg(short, long)]
    pub model: Option<String>,

    /// Hugging Face hub revision
    #[arg(long)]
    pub revision: Option<String>,

    /// Compute device: auto, cpu, cuda or mps
    #[arg(long)]
    pub device: Option<DeviceKind>,

    /// CUDA device ordinal
    #[arg(long)]
    pub device_index: Option<usize>,

    /// Maximum summary length
    #[arg(long)]
    pub max_length: Option<u32>,

    /// Minimum summary length
    #[arg(long)]
    pub min_length: Option<u32>,

    /// Use sampling instead of deterministic decoding
    #[arg(long)]
    pub sample: bool,

    #[arg(long)]
    pub num_beams: Option<u32>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the JSON schema of the configuration file
    Schema,
}
