//! vcardqr: vCard QR code service
//!
//! Usage:
//!   vcardqr                   - Start the HTTP server
//!   vcardqr --config <path>   - Start with an explicit configuration file
//!   vcardqr --help            - Show help

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use vcardqr::config::AppConfig;

/// Run mode
enum RunMode {
    /// HTTP server, optionally with an explicit configuration file
    Server(Option<PathBuf>),
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1))?;

    let config_path = match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("vcardqr {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server(path) => path,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    let config = AppConfig::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting vcardqr {}", env!("CARGO_PKG_VERSION"));
    vcardqr::server::serve(config).await?;
    Ok(())
}

/// Log filter from `RUST_LOG` directives, falling back to `info`
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Parse command line arguments
fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<RunMode> {
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {} (see --help)", other),
        }
    }
    Ok(RunMode::Server(config_path))
}

/// Print help message
fn print_help() {
    println!("vcardqr - vCard QR code generator service");
    println!();
    println!("Usage:");
    println!("  vcardqr                  Start the HTTP server");
    println!("  vcardqr --config <path>  Read configuration from <path>");
    println!("  vcardqr --help           Show this help message");
    println!("  vcardqr --version        Show version");
    println!();
    println!("Environment Variables:");
    println!("  VCARDQR_SERVER__HOST     Bind address (default: 0.0.0.0)");
    println!("  VCARDQR_SERVER__PORT     Bind port (default: 5000)");
    println!("  VCARDQR_STYLE            Response style: server or serverless (default: server)");
    println!("  RUST_LOG                 Log filter (default: info)");
}
