mod config;
mod error;
mod handlers;
mod state;
mod storage;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use aws_config::BehaviorVersion;
use clap::{Parser, Subcommand};
use lambda_runtime::service_fn;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use votetally_core::storage::ObjectStore;
use votetally_core::tally::VoteRecord;

use crate::{
    config::{logging_level_from_env, Config},
    handlers::{function_handler, handle},
    state::AppState,
    storage::{DynamoDbItemStore, InMemoryItemStore, S3ObjectStore},
};

/// votetally - Count votes stored in DynamoDB
#[derive(Parser, Debug)]
#[command(name = "votetally")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Lambda runtime loop (default)
    Serve,
    /// Run a single invocation locally and print the result
    Invoke {
        /// Path to the JSON event, or `-` to read it from stdin
        #[arg(long, short)]
        event: PathBuf,
        /// Answer from an in-memory table seeded with TYPE=COUNT instead of DynamoDB
        #[arg(long = "seed", value_name = "TYPE=COUNT", value_parser = parse_seed)]
        seeds: Vec<VoteRecord>,
    },
    /// Delete every object in an S3 bucket
    Purge {
        /// Bucket to empty
        #[arg(long, short, env = "BUCKET_NAME")]
        bucket: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Invoke { event, seeds } => invoke(&event, seeds).await,
        Command::Purge { bucket } => purge(bucket).await,
    }
}

/// Serve invocations from the Lambda runtime API.
async fn serve() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.logging_level, true);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let state = dynamodb_state(&sdk_config, &config);

    lambda_runtime::run(service_fn(|event| function_handler(&state, event)))
        .await
        .map_err(|e| anyhow!(e))
}

/// Run one invocation against DynamoDB, or against a seeded in-memory table.
async fn invoke(event_path: &Path, seeds: Vec<VoteRecord>) -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.logging_level, false);

    let state = if seeds.is_empty() {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        dynamodb_state(&sdk_config, &config)
    } else {
        let store = InMemoryItemStore::new(
            config.votes_table_name.clone(),
            config.votes_table_partition_key.clone(),
        );
        for record in seeds {
            store.put(record).await;
        }
        AppState::new(Arc::new(store), config.valid_vote_types.clone())
    };

    let event = read_event(event_path)?;
    let result = handle(&state, event).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Empty an S3 bucket.
async fn purge(bucket: String) -> Result<()> {
    init_tracing(logging_level_from_env()?, false);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config), bucket);

    let deleted = store.delete_all().await?;
    tracing::info!(bucket = store.bucket_name(), deleted, "Bucket purged");
    Ok(())
}

fn dynamodb_state(sdk_config: &aws_config::SdkConfig, config: &Config) -> AppState {
    let mut store = DynamoDbItemStore::new(
        aws_sdk_dynamodb::Client::new(sdk_config),
        config.votes_table_name.clone(),
        config.votes_table_partition_key.clone(),
    );
    if let Some(sort_key) = &config.votes_table_sort_key {
        store = store.with_sort_key(sort_key.clone());
    }

    tracing::debug!(
        table = %config.votes_table_name,
        partition_key = %config.votes_table_partition_key,
        sort_key = ?store.sort_key(),
        vote_types = %config.valid_vote_types,
        "Votes table configured"
    );

    AppState::new(Arc::new(store), config.valid_vote_types.clone())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Lambda output is
/// JSON without ANSI colors.
fn init_tracing(level: Level, json: bool) {
    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("warn,votetally={level},votetally_core={level}").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_ansi(false)))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

fn read_event(path: &Path) -> Result<serde_json::Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event from {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

/// Parses a `TYPE=COUNT` seed, uppercasing the type.
fn parse_seed(raw: &str) -> std::result::Result<VoteRecord, String> {
    let (vote_type, count) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=COUNT, got '{raw}'"))?;
    let vote_type = vote_type.trim().to_uppercase();
    if vote_type.is_empty() {
        return Err(format!("missing vote type in '{raw}'"));
    }
    let count = count
        .trim()
        .parse()
        .map_err(|_| format!("count must be a non-negative integer, got '{count}'"))?;

    Ok(VoteRecord::new(vote_type, count))
}
