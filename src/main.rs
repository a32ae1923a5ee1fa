use std::path::PathBuf;

use clap::Parser;
use skillmig::{Config, FailurePolicy};

#[derive(Parser)]
#[command(
    name = "skillmig",
    about = "Normalise player skill fields in the club database"
)]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `store.uri`.
    #[arg(long)]
    store_uri: Option<String>,

    /// Log and skip players that fail to migrate instead of stopping.
    #[arg(long)]
    skip_failures: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log every migrated player.
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(uri) = cli.store_uri {
        config.store.uri = uri;
    }
    if cli.skip_failures {
        config.migration.on_record_error = FailurePolicy::Skip;
    }
    tracing::info!(
        database = %config.store.database,
        collection = %config.store.collection,
        policy = ?config.migration.on_record_error,
        "config loaded"
    );

    let report = skillmig::migrate(&config).await?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
