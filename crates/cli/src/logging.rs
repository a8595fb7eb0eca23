use tracing::level_filters::LevelFilter;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Setup tracing + log integration
///
/// Library crates log through `log`; `LogTracer` forwards those records into
/// the subscriber. Output goes to stderr so stdout only carries summaries.
pub fn setup_logging() {
    LogTracer::init().expect("Failed to set LogTracer");
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
