//! API server implementation

use std::net::SocketAddr;

use axum::Router;
use axum::http::{HeaderValue, Method};
use sprintsheet_core::config::ServerConfig;
use sprintsheet_core::{Error, Result};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes;
use crate::state::AppState;

/// CORS layer allowing the configured origins.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Full application: routes plus CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.cors_origins);
    api_routes(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Resolve the bind address from server settings.
///
/// `host` may be an IPv4 or IPv6 literal (`::` included) or a hostname such
/// as `localhost`; the first resolved address is used.
pub async fn bind_addr(config: &ServerConfig) -> Result<SocketAddr> {
    let host = config.host.trim();
    let mut addrs = tokio::net::lookup_host((host, config.port))
        .await
        .map_err(|e| Error::config(format!("invalid bind host '{host}': {e}")))?;
    addrs
        .next()
        .ok_or_else(|| Error::config(format!("bind host '{host}' resolved to no address")))
}

/// Serve the API until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = bind_addr(&state.config().server).await?;
    tracing::info!("Serving {} on http://{addr}", state.sheets().describe());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_addr_ip_literals() {
        let config = ServerConfig::default();
        assert_eq!(bind_addr(&config).await.unwrap().port(), 8000);

        let v6 = ServerConfig {
            host: "::".into(),
            port: 9000,
            ..ServerConfig::default()
        };
        let addr = bind_addr(&v6).await.unwrap();
        assert!(addr.is_ipv6());
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 9000);
    }

    #[tokio::test]
    async fn test_bind_addr_resolves_localhost() {
        let config = ServerConfig {
            host: "localhost".into(),
            ..ServerConfig::default()
        };
        let addr = bind_addr(&config).await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }

    #[tokio::test]
    async fn test_bind_addr_rejects_malformed_host() {
        let bad = ServerConfig {
            host: "[::1".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(bind_addr(&bad).await, Err(Error::Config { .. })));
    }
}
