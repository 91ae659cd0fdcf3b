//! payroll-engine: HTTP server for gross/net salary calculations.
//!
//! Reads config from env vars:
//!   PAYROLL_CONFIG_DIR: policy YAML directory (default: built-in statutory tables)
//!   PAYROLL_BIND_ADDR: listen address (default: 127.0.0.1:3000)

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payroll_engine=debug".into()),
        )
        .init();

    let loader = match std::env::var("PAYROLL_CONFIG_DIR") {
        Ok(dir) => ConfigLoader::load(&dir)?,
        Err(_) => {
            tracing::info!("PAYROLL_CONFIG_DIR not set, using statutory policy tables");
            ConfigLoader::statutory()
        }
    };
    let bind_addr =
        std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());

    let app = create_router(AppState::new(loader.into_table()));

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "payroll-engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
