//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `planning_core` wiring end to end without an external store.
//! - Resolve the acting user through the configured session id field.

use clap::Parser;
use planning_core::{
    init_logging, load_config, Clock, ItemState, LogNotifier, MemoryItemStore, PlanningItem,
    PlanningSpikeService, SessionAuthenticator, SystemClock,
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;

/// Spikes and unspikes one in-memory planning item.
#[derive(Debug, Parser)]
#[command(name = "planning_cli", version, about)]
struct Args {
    /// TOML config file; defaults apply when it does not exist.
    #[arg(default_value = "planning.toml")]
    config: PathBuf,

    /// Session user id, stored under the configured `auth.id_field`.
    #[arg(long, default_value = "cli")]
    user: String,

    /// Workflow state of the item before it is spiked.
    #[arg(long, default_value = "active", value_parser = parse_state)]
    state: ItemState,
}

fn parse_state(value: &str) -> Result<ItemState, String> {
    ItemState::parse(value).ok_or_else(|| format!("unknown item state `{value}`"))
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("planning_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|err| err.to_string())?;

    if config.logging.dir.is_some() {
        init_logging(&config.logging)?;
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        planning_core::core_version()
    );

    let mut user = Map::new();
    user.insert(config.auth.id_field.clone(), Value::String(args.user));
    let session = SessionAuthenticator::new(Some(user), config.auth.id_field.as_str());

    let mut item = PlanningItem::with_id("smoke-1");
    item.state = args.state;
    let store = MemoryItemStore::new();
    store.insert(item.clone()).map_err(|err| err.to_string())?;

    let service = PlanningSpikeService::new(store, LogNotifier, SystemClock, config.expiry);

    let spiked = service
        .spike(&session, &item.id, &item)
        .map_err(|err| err.to_string())?;
    println!(
        "spiked id={} state={} expiry={:?} expired={}",
        spiked.id,
        spiked.state,
        spiked.expiry,
        spiked.is_expired(SystemClock.now_epoch_ms())
    );

    let unspiked = service
        .unspike(&session, &spiked.id, &spiked)
        .map_err(|err| err.to_string())?;
    println!(
        "unspiked id={} state={} expiry={:?}",
        unspiked.id, unspiked.state, unspiked.expiry
    );

    Ok(())
}
