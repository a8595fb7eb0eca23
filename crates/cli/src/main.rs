use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use spinners::{Spinner, Spinners, Stream};
use std::fs;
use std::io::{self, IsTerminal, Read};
use summarizer::{Summarizer, SummarizerConfig, Summary};

mod cli_args;
mod logging;
mod sample;
mod settings;

use cli_args::{CliArgs, Commands};
use logging::setup_logging;
use sample::SAMPLE_TEXT;
use settings::load_config;

fn load_summarizer(cfg: SummarizerConfig) -> Result<Summarizer> {
    let mut spinner = io::stderr().is_terminal().then(|| {
        Spinner::with_stream(
            Spinners::Dots,
            format!("Loading {}", cfg.model),
            Stream::Stderr,
        )
    });
    let result = Summarizer::try_from_config(&cfg);
    if let Some(sp) = spinner.as_mut() {
        sp.stop_with_newline();
    }
    // Logged only once the spinner has released the terminal line.
    Ok(result.inspect_err(|err| log::error!("Error initializing summarizer: {}", err))?)
}

/// Summarize the built-in sample and print it with its lengths.
fn run_demo(summarizer: &Summarizer) {
    let summary = summarizer.summarize_default(SAMPLE_TEXT).into_text();
    println!("Original Text: {}", SAMPLE_TEXT);
    println!("Original Text Length: {}", SAMPLE_TEXT.chars().count());
    println!("Summary Length: {}", summary.chars().count());
    println!("\nSummary:\n{}", summary);
}

fn print_summary(label: &str, summary: &Summary) {
    println!("{} {}", "==>".bright_blue(), label.bold());
    match summary {
        Summary::Success(text) => println!("{}", text),
        Summary::Failed(_) => println!("{}", summary.to_string().bright_red()),
        _ => println!("{}", summary.to_string().bright_yellow()),
    }
    println!();
}

fn main() -> Result<()> {
    setup_logging();
    let args = CliArgs::parse();

    if let Some(Commands::Schema) = &args.command {
        println!("{}", SummarizerConfig::config_schema());
        return Ok(());
    }

    let cfg = load_config(&args)?;

    if args.stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        let summarizer = load_summarizer(cfg)?;
        println!("{}", summarizer.summarize_default(&text));
        return Ok(());
    }

    if args.files.is_empty() {
        let summarizer = load_summarizer(cfg)?;
        run_demo(&summarizer);
        return Ok(());
    }

    let texts = args
        .files
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let summarizer = load_summarizer(cfg)?;
    let summaries = summarizer.batch_summarize_default(&texts);
    for (path, summary) in args.files.iter().zip(&summaries) {
        print_summary(&path.display().to_string(), summary);
    }

    Ok(())
}
