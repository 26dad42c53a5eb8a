use anyhow::{anyhow, Error as AnyError};
use axum::{routing::get, Router};
use std::sync::Arc;
use stm_axum::{TokenGuard, TokenGuardRouteExt, TokenPublisherRouteExt};
use stm_core::pool::TokenManager;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app_config::AppConfig;

async fn ping() -> &'static str {
    "pong"
}

/// Create the service routes: the token endpoint and the token guarded api.
pub fn create_router(config: &AppConfig, manager: Arc<dyn TokenManager>) -> Result<Router, AnyError> {
    if !config.token_path.starts_with('/') {
        return Err(anyhow!("Token path must start with '/': {}", config.token_path));
    }

    let guard = TokenGuard::from_header_str(manager.clone(), &config.token_header)
        .map_err(|err| anyhow!("Invalid token header ({}): {err}", config.token_header))?;
    let api = Router::new().route("/api/ping", get(ping)).with_token_guard(guard);

    let log_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(api
        .with_token_publisher(&config.token_path, manager)
        .layer(log_layer))
}
