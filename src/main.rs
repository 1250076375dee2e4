use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use taskdeck::app::App;
use taskdeck::board::{ItemActionController, ItemId, ItemSet};
use taskdeck::config::Config;
use taskdeck::headless::{run_triggers, LineAnnouncer};
use taskdeck::task::TaskClient;

/// Get the config directory path (~/.config/taskdeck/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("taskdeck"))
}

#[derive(Parser, Debug)]
#[command(name = "taskdeck", about = "Terminal card board for running remote tasks")]
struct Args {
    /// Config file (default: ~/.config/taskdeck/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the task server, overriding the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Number of cards to start with, overriding the config file
    #[arg(long, value_name = "N")]
    items: Option<usize>,

    /// Run the task for this card id without the UI (repeatable)
    #[arg(long, value_name = "ID")]
    trigger: Vec<ItemId>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the TUI or headless output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(base_url) = args.base_url {
        config.api_base_url = base_url;
    }
    if let Some(items) = args.items {
        config.item_count = items;
    }
    config.validate().context("Invalid configuration")?;

    let client = TaskClient::new(
        &config.api_base_url,
        config.request_timeout(),
        config.api_token(),
    )
    .context("Failed to create task client")?;
    tracing::info!(base_url = %client.base_url(), items = config.item_count, "Starting");

    let (mut controller, mut notice_rx) =
        ItemActionController::new(client, ItemSet::seeded(config.item_count));

    if !args.trigger.is_empty() {
        let mut announcer = LineAnnouncer::new(std::io::stdout().lock());
        let report =
            run_triggers(&mut controller, &mut notice_rx, &args.trigger, &mut announcer).await;
        for id in &report.unknown {
            eprintln!("Unknown card id {}, skipped", id);
        }
        if !report.all_succeeded() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut app = App::new(controller);
    taskdeck::ui::run(&mut app, notice_rx).await?;

    Ok(())
}
