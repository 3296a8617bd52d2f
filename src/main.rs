//! # Citation Extractor Server: Main Driver
//!
//! ## Purpose
//! Entry point for the citation extraction server. Loads configuration,
//! loads and compiles the alias dictionary into a [`CompiledRecognizer`],
//! and starts the HTTP API.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration.
//! 2. Initialize logging.
//! 3. Load the alias dictionary and build the recognizer (fatal on failure,
//!    surfaced as `AliasLoadFailure`/`RecognizerBuildFailure`).
//! 4. Start the HTTP API server.
//! 5. Handle shutdown signals gracefully.

use clap::{Arg, Command};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ru_legal_citation_extractor::{
    alias_dict,
    api::ApiServer,
    config::Config,
    errors::{CitationError, Result},
    recognizer::CompiledRecognizer,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("citation-extractor-server")
        .version("0.1.0")
        .author("Legal Search Team")
        .about("Extracts structured legal citations from free-form Russian-language text")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("check-health")
                .long("check-health")
                .help("Load the alias dictionary, build the recognizer, and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    let config = Arc::new(config);

    init_logging(&config)?;

    info!("starting citation extractor server v0.1.0");
    info!("configuration loaded from: {}", config_path);

    if matches.get_flag("check-health") {
        return run_health_checks(&config);
    }

    let app_state = initialize_components(config.clone())?;

    let server = ApiServer::new(app_state.clone()).await?;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("server error: {e}");
        }
    });

    info!(
        "citation extractor server started successfully on {}:{}",
        config.server.host, config.server.port
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("received SIGINT, shutting down gracefully...");
        }
        _ = server_handle => {
            error!("server stopped unexpectedly");
        }
    }

    info!("citation extractor server shut down successfully");
    Ok(())
}

/// Initialize logging and tracing.
fn init_logging(config: &Config) -> Result<()> {
    let log_level = config.logging.level.parse().map_err(|_| CitationError::Config {
        message: format!("invalid log level: {}", config.logging.level),
    })?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(fmt_layer.json().with_filter(
                tracing_subscriber::filter::LevelFilter::from_level(log_level),
            ))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt_layer.with_filter(tracing_subscriber::filter::LevelFilter::from_level(log_level)),
            )
            .init();
    }

    info!("logging initialized with level: {}", config.logging.level);
    Ok(())
}

/// Load the alias dictionary and compile the recognizer. Both failure modes
/// here are fatal at startup.
fn initialize_components(config: Arc<Config>) -> Result<AppState> {
    info!("loading alias dictionary from {:?}", config.alias.dict_path);
    let dict = alias_dict::load_from_path(&config.alias.dict_path)?;

    info!("compiling recognizer from {} law ids", dict.len());
    let recognizer = Arc::new(CompiledRecognizer::build(&dict)?);

    Ok(AppState { config, recognizer })
}

/// Run startup health checks and exit: does the alias dictionary load, does
/// the recognizer build.
fn run_health_checks(config: &Config) -> Result<()> {
    info!("running health checks...");
    initialize_components(Arc::new(config.clone()))?;
    info!("✓ alias dictionary loads and recognizer builds");
    info!("all health checks passed!");
    Ok(())
}
