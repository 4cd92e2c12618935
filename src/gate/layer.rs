//! Tower wiring for the maintenance gate.
//!
//! The layer must wrap the whole router, not be added with `Router::layer`:
//! route layers run after routing, so a rewrite there would never reach the
//! maintenance handler.
use super::{GateDecision, MaintenanceGate};
use axum::{extract::OriginalUri, http::Request};
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

#[derive(Clone)]
pub struct MaintenanceLayer {
    gate: Arc<MaintenanceGate>,
}

impl MaintenanceLayer {
    #[must_use]
    pub fn new(gate: MaintenanceGate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}

impl<S> Layer<S> for MaintenanceLayer {
    type Service = MaintenanceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MaintenanceService {
            inner,
            gate: self.gate.clone(),
        }
    }
}

#[derive(Clone)]
pub struct MaintenanceService<S> {
    inner: S,
    gate: Arc<MaintenanceGate>,
}

impl<S, B> Service<Request<B>> for MaintenanceService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if let GateDecision::Rewrite(rewritten) = self.gate.evaluate(req.uri()) {
            // handlers still see the address the client asked for
            if req.extensions().get::<OriginalUri>().is_none() {
                let original = OriginalUri(req.uri().clone());
                req.extensions_mut().insert(original);
            }
            *req.uri_mut() = rewritten;
        }

        self.inner.call(req)
    }
}
