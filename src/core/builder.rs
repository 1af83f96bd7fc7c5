//! Builder for constructing HandlerCell instances.

use crate::core::HandlerCell;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::HandlerMetrics;

const DEFAULT_CELL_NAME: &str = "default";

/// Builder for a [`HandlerCell`].
///
/// The initial handler is taken up front, so a cell can never be built empty.
///
/// # Examples
///
/// ```rust
/// use hotswap_handler::prelude::*;
///
/// let cell = HandlerCell::builder(handler_fn(|_: ()| async { 200u16 }))
///     .with_name("public-api")
///     .build();
///
/// assert_eq!(cell.name(), "public-api");
/// ```
pub struct HandlerCellBuilder<H> {
    initial: Arc<H>,
    name: Option<String>,
    #[cfg(feature = "metrics")]
    meter: Option<opentelemetry::metrics::Meter>,
}

impl<H> HandlerCellBuilder<H> {
    pub(crate) fn new(initial: Arc<H>) -> Self {
        Self {
            initial,
            name: None,
            #[cfg(feature = "metrics")]
            meter: None,
        }
    }

    /// Name the cell. Used in log events and as the `cell` metric attribute.
    ///
    /// Defaults to `"default"`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record dispatch and replacement metrics through `meter`.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, meter: opentelemetry::metrics::Meter) -> Self {
        self.meter = Some(meter);
        self
    }

    /// Build the cell.
    pub fn build(self) -> HandlerCell<H> {
        let name: Arc<str> = Arc::from(self.name.as_deref().unwrap_or(DEFAULT_CELL_NAME));

        #[cfg(feature = "tracing")]
        tracing::debug!(cell = %name, "handler cell created");

        #[cfg(feature = "metrics")]
        let metrics = self.meter.map(|meter| HandlerMetrics::new(meter, &name));

        let cell = HandlerCell::from_parts(self.initial, name);

        #[cfg(feature = "metrics")]
        let cell = cell.with_metrics(metrics);

        cell
    }
}
