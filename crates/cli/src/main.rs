mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recast_core::{
    load_config, load_config_from_env, run_pipeline, validate_config, Config,
    EXIT_PRECONDITION_FAILED,
};

/// Default config file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "recast.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            EXIT_PRECONDITION_FAILED
        }
    };
    std::process::exit(code);
}

async fn run() -> Result<i32> {
    // Initialize logging on stderr; stdout carries the run summary
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load(std::env::var_os("RECAST_CONFIG").map(PathBuf::from))?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Input directory: {:?}", config.paths.input_dir);

    match run_pipeline(&config).await {
        Ok(outcome) => {
            print!("{}", summary::render(&config, &outcome));
            Ok(outcome.exit_code())
        }
        Err(e) => {
            println!("{}", e);
            Ok(e.exit_code())
        }
    }
}

/// Explicit config path must exist; otherwise fall back to `recast.toml`
/// when present, then to defaults plus environment.
fn load(explicit: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = explicit {
        info!("Loading configuration from {:?}", path);
        return load_config(&path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        info!("Loading configuration from {:?}", default_path);
        return load_config(default_path)
            .with_context(|| format!("Failed to load config from {:?}", default_path));
    }

    info!("No config file, using defaults and environment");
    load_config_from_env().context("Failed to load configuration from environment")
}
