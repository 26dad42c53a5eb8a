use crate::Problem;
use axum::{
    extract::Request,
    http::{header::InvalidHeaderName, HeaderName},
    response::{IntoResponse, Response},
    Router,
};
use futures::future::BoxFuture;
use std::{
    convert::Infallible,
    sync::Arc,
    task::{Context, Poll},
};
use stm_core::pool::TokenManager;
use tower::{Layer, Service};

pub const DEFAULT_TOKEN_HEADER: &str = "x-token";

/// Middleware to admit only the requests presenting a valid token in the given header.
/// Requests without the header or with a token unknown to the manager are rejected with 401
/// before reaching the inner service.
#[derive(Clone)]
pub struct TokenGuard {
    manager: Arc<dyn TokenManager>,
    header: HeaderName,
}

impl TokenGuard {
    pub fn new(manager: Arc<dyn TokenManager>, header: HeaderName) -> Self {
        Self { manager, header }
    }

    pub fn from_header_str(manager: Arc<dyn TokenManager>, header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self::new(manager, HeaderName::try_from(header)?))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    fn check(&self, request: &Request) -> bool {
        let token = request
            .headers()
            .get(&self.header)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");
        self.manager.validate(token)
    }
}

impl<S> Layer<S> for TokenGuard {
    type Service = TokenGuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TokenGuardMiddleware { inner, layer: self.clone() }
    }
}

#[derive(Clone)]
#[must_use]
pub struct TokenGuardMiddleware<I> {
    inner: I,
    layer: TokenGuard,
}

impl<I> Service<Request> for TokenGuardMiddleware<I>
where
    I: Service<Request, Error = Infallible> + Send + 'static,
    I::Response: IntoResponse,
    I::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if !self.layer.check(&request) {
            log::debug!("Rejecting {} {}, no valid token in {}", request.method(), request.uri().path(), self.layer.header);
            return Box::pin(async { Ok(Problem::invalid_token().into_response()) });
        }

        let future = self.inner.call(request);
        Box::pin(async move { future.await.map(IntoResponse::into_response) })
    }
}

/// Helper trait to guard all the routes of a router with a token check.
/// The guard covers only the routes already added, unmatched paths still fall through to the fallback.
pub trait TokenGuardRouteExt {
    fn with_token_guard(self, guard: TokenGuard) -> Self;
}

impl<S> TokenGuardRouteExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_token_guard(self, guard: TokenGuard) -> Self {
        self.route_layer(guard)
    }
}
