//! Request instrumentation for individual routes.
//!
//! [`InstrumentLayer`] decorates a route's service so that every call is
//! timed and its outcome recorded through the injected [`Metrics`]
//! implementation:
//!
//! - duration (seconds) keyed by `(path, method)`
//! - request count keyed by `(path, method, status)`
//!
//! The path label is fixed at registration time rather than read from the
//! URI, which keeps label cardinality bounded by the number of routes.
//! The response passes through untouched; only its status is read, and an
//! axum response that never set one carries the default `200 OK`.
//!
//! If the inner service fails or panics, nothing is recorded and the
//! failure reaches the caller unchanged.
//!
//! [`Metrics`]: crate::domain::Metrics

use crate::domain::MetricsPtr;
use axum::http::Request;
use axum::response::Response;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// Layer that wraps a route with [`Instrumented`].
#[derive(Clone)]
pub struct InstrumentLayer {
    // ---
    path: Arc<str>,
    metrics: MetricsPtr,
}

impl InstrumentLayer {
    // ---
    pub fn new(path: &str, metrics: MetricsPtr) -> Self {
        // ---
        Self {
            path: Arc::from(path),
            metrics,
        }
    }
}

impl<S> Layer<S> for InstrumentLayer {
    type Service = Instrumented<S>;

    fn layer(&self, inner: S) -> Self::Service {
        // ---
        Instrumented {
            inner,
            path: Arc::clone(&self.path),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Service decorator that records duration and outcome of each call.
#[derive(Clone)]
pub struct Instrumented<S> {
    // ---
    inner: S,
    path: Arc<str>,
    metrics: MetricsPtr,
}

impl<S, B> Service<Request<B>> for Instrumented<S>
where
    S: Service<Request<B>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        // ---
        let start = Instant::now();
        let method = request.method().clone();
        let path = Arc::clone(&self.path);
        let metrics = Arc::clone(&self.metrics);

        let response = self.inner.call(request);

        Box::pin(async move {
            let response = response.await?;

            let status = response.status().as_u16();
            metrics.record_http_request(start, &path, method.as_str(), status);

            Ok(response)
        })
    }
}
