//! The handler abstraction shared by concrete handlers and the cell.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Something that turns a request into a response.
///
/// This is the one capability the crate cares about. Routers, middleware
/// stacks and plain async functions all implement it, and so does
/// [`HandlerCell`](crate::core::HandlerCell), which lets a cell stand in
/// anywhere a single handler is expected.
///
/// Failures are part of the response type: a handler that can fail should use
/// `Response = Result<T, E>`. Callers get that value back exactly as the
/// handler produced it.
///
/// # Examples
///
/// ```rust
/// use hotswap_handler::prelude::*;
/// use async_trait::async_trait;
///
/// struct Greeter {
///     greeting: &'static str,
/// }
///
/// #[async_trait]
/// impl Handler<String> for Greeter {
///     type Response = String;
///
///     async fn handle(&self, name: String) -> String {
///         format!("{}, {}!", self.greeting, name)
///     }
/// }
/// ```
#[async_trait]
pub trait Handler<Req>: Send + Sync
where
    Req: Send + 'static,
{
    /// The value produced for each request.
    type Response: Send;

    /// Process a single request.
    async fn handle(&self, req: Req) -> Self::Response;
}

/// A type-erased handler, for cells that switch between unrelated handler types.
pub type BoxHandler<Req, Resp> = Box<dyn Handler<Req, Response = Resp>>;

#[async_trait]
impl<Req, H> Handler<Req> for Arc<H>
where
    Req: Send + 'static,
    H: Handler<Req> + ?Sized,
{
    type Response = H::Response;

    async fn handle(&self, req: Req) -> Self::Response {
        (**self).handle(req).await
    }
}

#[async_trait]
impl<Req, H> Handler<Req> for Box<H>
where
    Req: Send + 'static,
    H: Handler<Req> + ?Sized,
{
    type Response = H::Response;

    async fn handle(&self, req: Req) -> Self::Response {
        (**self).handle(req).await
    }
}

/// Handler backed by an async closure. Created with [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async function or closure as a [`Handler`].
///
/// # Examples
///
/// ```rust
/// use hotswap_handler::prelude::*;
///
/// # async fn example() {
/// let ok = handler_fn(|_path: String| async { 200u16 });
/// assert_eq!(ok.handle("/".to_string()).await, 200);
/// # }
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F> {
    HandlerFn { f }
}

#[async_trait]
impl<Req, F, Fut> Handler<Req> for HandlerFn<F>
where
    Req: Send + 'static,
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future + Send + 'static,
    Fut::Output: Send,
{
    type Response = Fut::Output;

    async fn handle(&self, req: Req) -> Self::Response {
        (self.f)(req).await
    }
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}
