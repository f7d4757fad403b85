//! Little Lemon restaurant site.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http::server ──▶ routing ──▶ http::handlers ──▶ http::pages
//!                    (middleware)     (routes)    (extractors)        │
//!                                                                     ▼
//!                                                      restaurant::form (validate)
//!                                                      Catalog / Ledger (store)
//!                                                                     │
//!     Client Response                                                 ▼
//!     ◀───────────── http::response ◀── templates ◀──────── Reply (view | redirect)
//!                    (message cookie)                        + queued messages
//! ```

use std::path::PathBuf;

use clap::Parser;

use little_lemon::config::load_or_default;
use little_lemon::lifecycle::startup;
use little_lemon::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "little-lemon")]
#[command(about = "Little Lemon restaurant website", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        database = %config.database.url,
        request_timeout_secs = config.timeouts.request_secs,
        "little-lemon starting"
    );

    startup::run(config).await?;
    Ok(())
}
