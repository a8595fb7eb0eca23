use anyhow::{Context, Result};
use std::path::PathBuf;
use summarizer::SummarizerConfig;

use crate::cli_args::CliArgs;

/// `<config dir>/summarizer/config.toml`, if the platform has a config dir.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("summarizer").join("config.toml"))
}

/// Build the effective configuration: defaults, then the config file, then
/// command line flags.
pub fn load_config(args: &CliArgs) -> Result<SummarizerConfig> {
    let cfg = match &args.config {
        Some(path) => SummarizerConfig::from_toml_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => {
                log::debug!("Using config file {}", path.display());
                SummarizerConfig::from_toml_file(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?
            }
            None => SummarizerConfig::default(),
        },
    };
    Ok(apply_overrides(cfg, args))
}

pub fn apply_overrides(mut cfg: SummarizerConfig, args: &CliArgs) -> SummarizerConfig {
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    if let Some(revision) = &args.revision {
        cfg.revision = Some(revision.clone());
    }
    if let Some(device) = args.device {
        cfg.device = device;
    }
    if let Some(index) = args.device_index {
        cfg.device_index = Some(index);
    }
    if let Some(max_length) = args.max_length {
        cfg.options.max_length = max_length;
    }
    if let Some(min_length) = args.min_length {
        cfg.options.min_length = min_length;
    }
    if args.sample {
        cfg.options.do_sample = true;
    }
    if let Some(num_beams) = args.num_beams {
        cfg.options.num_beams = Some(num_beams);
    }
    cfg
}
