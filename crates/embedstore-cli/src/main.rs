//! embedstore CLI entry point.
//!
//! Binary name: `embedstore`
//!
//! Parses CLI arguments, resolves configuration (flags > environment >
//! config file > defaults), loads the embedding model, connects to the
//! vector store, and runs the requested command inside a scoped session so
//! the connection is released on every exit path.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::FutureExt;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use embedstore_core::session::with_session;
use embedstore_infra::config::load_config_file;
use embedstore_infra::embedding::FastEmbedder;
use embedstore_infra::vector::LanceVectorStore;
use embedstore_types::config::{ConfigFile, StoreConfig};

/// Embed texts with a local sentence-embedding model and persist them in a
/// vector store.
#[derive(Parser)]
#[command(name = "embedstore", version, about, long_about = None)]
struct Cli {
    /// Store endpoint: a local data directory or a `db://` cloud URI.
    #[arg(long, env = "EMBEDSTORE_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// API key for cloud endpoints.
    #[arg(long, env = "EMBEDSTORE_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Embedding model identifier.
    #[arg(long, env = "EMBEDSTORE_MODEL", global = true)]
    model: Option<String>,

    /// Collection to write to.
    #[arg(long, global = true)]
    collection: Option<String>,

    /// Path to a TOML config file (default: ~/.embedstore/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure the collection exists, then exit.
    Init,

    /// Embed one text and store it; prints the record id.
    Store {
        /// Text to embed and persist.
        text: String,

        /// Use this id instead of generating one.
        #[arg(long)]
        id: Option<String>,
    },

    /// Embed several texts and store them in one batch; prints one id per
    /// line, in input order.
    Batch {
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

/// Merge flags, environment (via clap), config file, and defaults.
fn resolve_config(cli: &Cli, file: ConfigFile) -> StoreConfig {
    let endpoint = cli
        .endpoint
        .clone()
        .or(file.endpoint)
        .unwrap_or_else(|| LanceVectorStore::default_data_dir().display().to_string());

    let mut config = StoreConfig::new(endpoint);
    config.api_key = cli
        .api_key
        .clone()
        .or(file.api_key)
        .map(SecretString::from);
    if let Some(collection) = cli.collection.clone().or(file.collection) {
        config.collection = collection;
    }
    if let Some(model) = cli.model.clone().or(file.model) {
        config.model = model;
    }
    config
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".embedstore")
        .join("config.toml")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,embedstore_core=debug,embedstore_infra=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let file = load_config_file(&config_path).await;
    let config = resolve_config(&cli, file);

    // Fail fast on bad connection parameters, before the model loads.
    config.validate()?;
    tracing::debug!(endpoint = %config.endpoint, model = %config.model, "resolved configuration");

    let embedder = FastEmbedder::from_model_id(&config.model)?;
    let store = LanceVectorStore::connect(&config).await?;

    let command = cli.command;
    with_session(embedder, store, &config.collection, move |session| {
        async move {
            match command {
                Commands::Init => {
                    println!("collection '{}' ready", session.collection());
                }
                Commands::Store { text, id } => {
                    let vector = session.embed(&text).await?;
                    let id = session.store_one(&text, vector, id).await?;
                    println!("{id}");
                }
                Commands::Batch { texts } => {
                    let ids = session.store_batch(&texts).await?;
                    for id in ids {
                        println!("{id}");
                    }
                }
            }
            Ok(())
        }
        .boxed()
    })
    .await?;

    Ok(())
}
