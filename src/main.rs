use clap::{CommandFactory, Parser};
use push_hook::api;
use push_hook::config::load_config;
use push_hook::error::Result;
use push_hook::logging::setup_logging;
use push_hook::{AppState, SharedState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Runs a deploy script when a watched repository branch is pushed.
#[derive(Parser)]
#[command(name = "push_hook", version)]
struct Cli {
    /// Path to the JSON (or .toml) config file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,
}

async fn serve(config_path: PathBuf) -> Result<()> {
    let config = load_config(&config_path)?.with_env_overrides();
    info!(
        "Loaded {} watch item(s) from {:?}",
        config.items.len(),
        config_path
    );

    let bind_address = config.bind.clone();
    let state: SharedState = Arc::new(AppState::new(config));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(bind_address.as_str()).await?;
    info!("Listening on {}", bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let Some(config_path) = cli.config else {
        // Nothing to serve without a config; show usage and leave quietly.
        Cli::command().print_help().ok();
        return;
    };

    dotenv::dotenv().ok();
    let log_guard = setup_logging();

    if let Err(e) = serve(config_path).await {
        error!("{}", e);
        drop(log_guard);
        std::process::exit(1);
    }
}
