//! The swappable handler cell.

use crate::core::{Handler, HandlerCellBuilder};
use crate::notify::{SubscriberRegistry, SubscriptionHandle};
use arc_swap::ArcSwap;
use std::sync::Arc;

#[cfg(feature = "validation")]
use crate::core::Validate;
#[cfg(feature = "validation")]
use crate::error::{Result, SwapError};

#[cfg(feature = "metrics")]
use crate::metrics::HandlerMetrics;

/// A handler slot that can be replaced while requests are flowing through it.
///
/// `HandlerCell` implements [`Handler`] itself, so it can be handed to a
/// server in place of the real router. Each dispatch takes a snapshot of the
/// current handler and runs the request against that snapshot without
/// holding any lock. A replacement only affects requests that start after
/// it; requests already running finish on the handler they started with.
///
/// Cloning a cell gives another handle to the same slot. Cells created
/// separately never share state.
///
/// # Examples
///
/// ```rust
/// use hotswap_handler::prelude::*;
///
/// # async fn example() {
/// let cell: HandlerCell<BoxHandler<String, u16>> =
///     HandlerCell::new(Box::new(handler_fn(|_path: String| async { 200u16 })));
/// assert_eq!(cell.dispatch("/".to_string()).await, 200);
///
/// cell.replace(Box::new(handler_fn(|_path: String| async { 404u16 })));
/// assert_eq!(cell.dispatch("/".to_string()).await, 404);
/// # }
/// ```
pub struct HandlerCell<H> {
    /// The current handler, wrapped in ArcSwap for atomic replacement
    current: Arc<ArcSwap<H>>,
    /// Label for log events and metric attributes
    name: Arc<str>,
    /// Callbacks run after each replacement
    subscribers: SubscriberRegistry,
    #[cfg(feature = "metrics")]
    metrics: Option<HandlerMetrics>,
}

impl<H> HandlerCell<H> {
    /// Create a cell holding `initial`.
    ///
    /// For a named cell or one with metrics, use [`HandlerCell::builder`].
    pub fn new(initial: H) -> Self {
        Self::from_arc(Arc::new(initial))
    }

    /// Create a cell from a handler that is already shared.
    pub fn from_arc(initial: Arc<H>) -> Self {
        HandlerCellBuilder::new(initial).build()
    }

    /// Start building a cell around `initial`.
    pub fn builder(initial: H) -> HandlerCellBuilder<H> {
        HandlerCellBuilder::new(Arc::new(initial))
    }

    pub(crate) fn from_parts(initial: Arc<H>, name: Arc<str>) -> Self {
        Self {
            current: Arc::new(ArcSwap::new(initial)),
            name,
            subscribers: SubscriberRegistry::new(),
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn with_metrics(mut self, metrics: Option<HandlerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The cell's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take a snapshot of the current handler.
    ///
    /// The snapshot stays usable after the cell is replaced; it keeps the old
    /// handler alive until it is dropped.
    pub fn current(&self) -> Arc<H> {
        self.current.load_full()
    }

    /// Forward `req` to the current handler and return its response unchanged.
    ///
    /// The handler is picked once, when dispatch starts. A concurrent
    /// replacement is seen either fully or not at all.
    pub async fn dispatch<Req>(&self, req: Req) -> H::Response
    where
        H: Handler<Req>,
        Req: Send + 'static,
    {
        self.record_dispatch();
        let handler = self.current.load_full();
        H::handle(&handler, req).await
    }

    /// Install `handler` as the current handler.
    pub fn replace(&self, handler: H) {
        self.replace_arc(Arc::new(handler));
    }

    /// Install an already shared handler as the current handler.
    pub fn replace_arc(&self, handler: Arc<H>) {
        self.current.store(handler);
        self.replaced("replace");
    }

    /// Install `handler` and return the one it displaced.
    pub fn swap(&self, handler: H) -> Arc<H> {
        let previous = self.current.swap(Arc::new(handler));
        self.replaced("swap");
        previous
    }

    /// Replace the handler with one derived from the current handler.
    ///
    /// `f` may run more than once if another replacement lands while it is
    /// building; the result is always derived from the handler it replaces.
    pub fn update<F>(&self, f: F)
    where
        F: Fn(&H) -> H,
    {
        self.current.rcu(|current| f(&**current));
        self.replaced("update");
    }

    /// Validate `handler` and install it if it passes.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Rejected`] if validation fails. The current
    /// handler is left in place.
    #[cfg(feature = "validation")]
    pub fn try_replace(&self, handler: H) -> Result<()>
    where
        H: Validate,
    {
        if let Err(source) = handler.validate() {
            #[cfg(feature = "tracing")]
            tracing::warn!(cell = %self.name, error = %source, "replacement handler rejected");

            #[cfg(feature = "metrics")]
            if let Some(metrics) = &self.metrics {
                metrics.record_validation_failure();
            }

            return Err(SwapError::Rejected {
                cell: self.name.to_string(),
                source,
            });
        }

        self.replace(handler);
        Ok(())
    }

    /// Run `callback` after every future replacement of this cell.
    ///
    /// Returns a handle that can be dropped to unsubscribe. Callbacks run on
    /// the thread that performed the replacement, in subscription order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hotswap_handler::prelude::*;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let cell: HandlerCell<BoxHandler<(), u16>> =
    ///     HandlerCell::new(Box::new(handler_fn(|_: ()| async { 200u16 })));
    /// let swaps = Arc::new(AtomicUsize::new(0));
    ///
    /// let counter = Arc::clone(&swaps);
    /// let _handle = cell.on_replace(move || {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// cell.replace(Box::new(handler_fn(|_: ()| async { 503u16 })));
    /// assert_eq!(swaps.load(Ordering::SeqCst), 1);
    /// ```
    pub fn on_replace<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let handle = self.subscribers.subscribe(callback);

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.update_subscriber_count(self.subscribers.subscriber_count());
        }

        handle
    }

    /// Number of active replace subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.subscriber_count()
    }

    /// The metrics collector attached by the builder, if any.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> Option<&HandlerMetrics> {
        self.metrics.as_ref()
    }

    /// Count a dispatch and refresh the gauges.
    ///
    /// Dropping a [`SubscriptionHandle`] does not touch the cell, so the
    /// subscriber gauge is brought up to date here as well.
    pub(crate) fn record_dispatch(&self) {
        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch();
            metrics.update_handler_age();
            metrics.update_subscriber_count(self.subscribers.subscriber_count());
        }
    }

    fn replaced(&self, _operation: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(cell = %self.name, operation = _operation, "handler replaced");

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_replace();
            metrics.update_handler_age();
            metrics.update_subscriber_count(self.subscribers.subscriber_count());
        }

        self.subscribers.notify_all();
    }
}

#[async_trait::async_trait]
impl<Req, H> Handler<Req> for HandlerCell<H>
where
    Req: Send + 'static,
    H: Handler<Req>,
{
    type Response = H::Response;

    async fn handle(&self, req: Req) -> Self::Response {
        self.dispatch(req).await
    }
}

impl<H> Clone for HandlerCell<H> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            name: Arc::clone(&self.name),
            subscribers: self.subscribers.clone(),
            #[cfg(feature = "metrics")]
            metrics: self.metrics.clone(),
        }
    }
}

impl<H> std::fmt::Debug for HandlerCell<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerCell")
            .field("name", &self.name)
            .field("subscribers", &self.subscribers.subscriber_count())
            .finish_non_exhaustive()
    }
}
