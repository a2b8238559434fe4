//! Maker Order Server
//!
//! An example order server for a liquidity provider ("maker"). It exposes a
//! single quoting endpoint: given a requested maker amount, it computes the
//! taker amount from a configured price book and returns an order payload
//! stamped with a 5-minute expiration and a random nonce.
//!
//! The server holds no private keys; signing and submission are handled by
//! the requesting client.

use anyhow::Result;
use tracing::info;

mod api;
mod config;
mod nonce;
mod pricing;
mod quote;

use config::Config;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

/// Main application entry point that initializes and runs the order server.
///
/// This function:
/// 1. Initializes logging and tracing
/// 2. Loads configuration from TOML file (or built-in defaults)
/// 3. Starts the API server
/// 4. Runs the service until shutdown
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging for debugging and monitoring
    tracing_subscriber::fmt::init();

    info!("Starting Order Server");

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for help flag
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("Order Server");
        println!();
        println!("Usage: order-server [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --config <path>   Use custom config file path");
        println!("  --help, -h        Show this help message");
        println!();
        println!("Environment variables:");
        println!("  ORDER_SERVER_CONFIG_PATH    Path to config file (overrides --config)");
        return Ok(());
    }

    // Check for custom config path
    let mut config_path = None;
    for (i, arg) in args.iter().enumerate() {
        if arg == "--config" && i + 1 < args.len() {
            config_path = Some(args[i + 1].clone());
            break;
        }
    }

    if let Some(path) = config_path {
        std::env::set_var("ORDER_SERVER_CONFIG_PATH", &path);
        info!("Using custom config: {}", path);
    }

    // Load configuration from config file (or ORDER_SERVER_CONFIG_PATH env var)
    let config = Config::load()?;
    info!("Configuration loaded successfully");

    // Run the API server (this blocks until shutdown)
    let api_server = api::ApiServer::new(config);
    api_server.run().await?;

    Ok(())
}
