//! Driving distance HTTP microservice.
//!
//! # Configuration
//!
//! - `GOOGLE_MAPS_KEY` - Distance Matrix API key (or `maps.key` in the runtime config)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use distquery_service::{init_logging, router, AppState, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_default_service("distance");
    init_logging(&logging_config);

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(
        service = logging_config.service.as_deref().unwrap_or("distance"),
        port = port,
        "starting distance service"
    );

    let state = AppState::from_platform().map_err(|e| {
        error!(error = %e, "failed to build HTTP client");
        e
    })?;

    if state.handler().credentials().resolve().is_err() {
        warn!("no API key configured; queries will fail until GOOGLE_MAPS_KEY or maps.key is set");
    }

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
