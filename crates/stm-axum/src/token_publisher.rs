use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use stm_core::pool::TokenManager;

pub const DEFAULT_TOKEN_PATH: &str = "/token";

/// A `GET` route answering with a freshly issued token as a plain text body.
pub fn token_publisher<S>(manager: Arc<dyn TokenManager>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(move || {
        let manager = manager.clone();
        async move {
            log::trace!("Publishing token");
            manager.issue()
        }
    })
}

/// Helper trait to mount the token publisher on a router.
pub trait TokenPublisherRouteExt {
    fn with_token_publisher(self, path: &str, manager: Arc<dyn TokenManager>) -> Self;
}

impl<S> TokenPublisherRouteExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_token_publisher(self, path: &str, manager: Arc<dyn TokenManager>) -> Self {
        self.route(path, token_publisher(manager))
    }
}
