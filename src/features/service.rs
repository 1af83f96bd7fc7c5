//! `tower::Service` support for handler cells.
//!
//! With the `tower` feature a `HandlerCell<S>` holding a cloneable service is
//! itself a service, so it can sit underneath axum, hyper-util or tonic the
//! same way the wrapped router would.

use crate::core::HandlerCell;
use std::future::{Future, poll_fn};
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_service::Service;

/// Future returned by [`HandlerCell`]'s `Service::call`.
pub type ServiceFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S, Req> Service<Req> for HandlerCell<S>
where
    S: Service<Req> + Clone + Send + 'static,
    S::Future: Send,
    Req: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ServiceFuture<S::Response, S::Error>;

    /// Always ready. Readiness of the wrapped service is checked per call,
    /// against the snapshot that call actually uses.
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Req) -> Self::Future {
        self.record_dispatch();
        let mut service = S::clone(&self.current());

        Box::pin(async move {
            poll_fn(|cx| service.poll_ready(cx)).await?;
            service.call(req).await
        })
    }
}
