//! `feedback`: interactive student course feedback manager.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use feedback_rs::Menu;
use feedback_rs::classifier::LexiconClassifier;
use feedback_rs::config::{FeedbackConfig, LayeredConfigOptions};
use feedback_rs::store::{FeedbackStore, InputPolicy};
use log::{debug, info};
use std::io;
use std::path::PathBuf;

/// Command-line options for the feedback manager.
#[derive(Parser)]
#[command(name = "feedback", version, about)]
struct Cli {
    /// Optional path to a feedback.json5 config file, applied last
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backing file location, overriding `store.path`
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    feedback_rs::init_logging();

    let cli = Cli::parse();
    info!(
        "starting feedback manager (config_set={}, store_set={})",
        cli.config.is_some(),
        cli.store.is_some()
    );

    let cwd = std::env::current_dir().context("cwd")?;
    let layered = if let Some(path) = cli.config.as_ref() {
        info!("using runtime config layer: {}", path.display());
        let options = LayeredConfigOptions::new(&cwd).with_runtime_path(path);
        FeedbackConfig::load_layered_with_options(options)
    } else {
        FeedbackConfig::load_layered(&cwd)
    }
    .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    let config = layered.config;

    let store_path = cli
        .store
        .unwrap_or_else(|| PathBuf::from(&config.store.path));
    let classifier = LexiconClassifier::new(config.classifier.clone());
    let store = FeedbackStore::open(
        &store_path,
        Box::new(classifier),
        InputPolicy::from_config(&config),
    )
    .with_context(|| format!("failed to load feedback from {}", store_path.display()))?;

    let skipped = store.load_issues().len();
    if skipped > 0 {
        println!(
            "{} skipped {skipped} malformed line(s) in {}",
            "Warning:".yellow(),
            store_path.display()
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(store, stdin.lock(), stdout.lock())
        .run()
        .context("console i/o failed")?;
    info!("feedback manager exited");
    Ok(())
}
