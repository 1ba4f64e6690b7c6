//! Greeting API entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hello_api::app;
use hello_api::config::Config;
use hello_api::error::AppError;

/// Greeting API server and client.
#[derive(Parser, Debug)]
#[command(name = "hello-api")]
#[command(about = "Serve the greeting API or fetch and render its greeting")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Fetch the greeting and print the rendered page.
    Fetch {
        /// Base URL of the API (overrides API_BASE_URL).
        #[arg(long)]
        url: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; .env must be loaded before the filter is built
    dotenvy::dotenv().ok();
    let filter = match Config::load() {
        Ok(config) => EnvFilter::try_new(config.log_directive(args.verbose))
            .unwrap_or_else(|_| EnvFilter::new("info")),
        Err(_) if args.verbose => EnvFilter::new("hello_api=debug,info"),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    match args.command {
        Some(Command::Serve) | None => cmd_serve(args.port).await,
        Some(Command::Fetch { url }) => cmd_fetch(url).await,
        Some(Command::CheckConfig) => cmd_check_config(),
    }
}

/// Load configuration, apply CLI overrides, then validate, logging failures.
fn load_config(overrides: impl FnOnce(&mut Config)) -> Result<Config, AppError> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    overrides(&mut config);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e));
    }

    Ok(config)
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(|config| {
        if let Some(port) = port_override {
            config.port = port;
        }
    })?;

    app::start_metrics(&config)?;

    let listener = app::bind(&config).await?;
    app::serve(listener, &config).await?;

    Ok(())
}

/// Mount the page view once and print what it renders.
async fn cmd_fetch(url_override: Option<String>) -> anyhow::Result<()> {
    let config = load_config(|config| {
        if let Some(url) = url_override {
            config.api_base_url = url;
        }
    })?;

    hello_api::metrics::init_metrics();
    let view = app::load_page(&config).await?;

    println!("{}", view.render());

    if let Some(reason) = view.error() {
        return Err(anyhow::anyhow!("Failed to load greeting: {}", reason));
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HELLO API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen: {}:{}", config.host, config.port);
    println!("  API Secret Key: {}", config.masked_secret());
    println!(
        "  Authorization: {}",
        if config.enforce_auth { "Enforced" } else { "Not enforced" }
    );
    println!("  Client Base URL: {}", config.api_base_url);
    println!("  Client Timeout: {}ms", config.http_timeout_ms);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled {
            format!("Enabled (port {})", config.metrics_port)
        } else {
            "Disabled".to_string()
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
