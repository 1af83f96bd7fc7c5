//! Handler cell metrics using OpenTelemetry.

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Gauge, Meter};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collector for a single handler cell.
///
/// Every instrument is tagged with a `cell` attribute so several cells can
/// report through the same meter.
///
/// # Examples
///
/// ```rust,no_run
/// use hotswap_handler::metrics::HandlerMetrics;
/// use opentelemetry::global;
///
/// let meter = global::meter("hotswap-handler");
/// let metrics = HandlerMetrics::new(meter, "api");
///
/// metrics.record_dispatch();
/// metrics.record_replace();
/// ```
#[derive(Clone)]
pub struct HandlerMetrics {
    dispatch_total: Counter<u64>,
    replace_total: Counter<u64>,
    validation_failures: Counter<u64>,
    handler_age_seconds: Gauge<i64>,
    active_subscribers: Gauge<i64>,
    attributes: Arc<[KeyValue]>,
    started: Instant,
    /// Milliseconds after `started` at which the current handler was installed
    last_replace_ms: Arc<AtomicU64>,
}

impl HandlerMetrics {
    /// Create a new metrics collector for the cell called `cell`.
    pub fn new(meter: Meter, cell: &str) -> Self {
        let dispatch_total = meter
            .u64_counter("hotswap_handler.dispatch.total")
            .with_description("Total number of requests dispatched through the cell")
            .build();

        let replace_total = meter
            .u64_counter("hotswap_handler.replace.total")
            .with_description("Number of handler replacements")
            .build();

        let validation_failures = meter
            .u64_counter("hotswap_handler.validation.failures")
            .with_description("Number of replacement handlers rejected by validation")
            .build();

        let handler_age_seconds = meter
            .i64_gauge("hotswap_handler.age")
            .with_description("Time since the current handler was installed in seconds")
            .with_unit("s")
            .build();

        let active_subscribers = meter
            .i64_gauge("hotswap_handler.subscribers.active")
            .with_description("Number of active replace subscribers")
            .build();

        Self {
            dispatch_total,
            replace_total,
            validation_failures,
            handler_age_seconds,
            active_subscribers,
            attributes: Arc::from(vec![KeyValue::new("cell", cell.to_string())]),
            started: Instant::now(),
            last_replace_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Count one dispatched request.
    pub fn record_dispatch(&self) {
        self.dispatch_total.add(1, &self.attributes);
    }

    /// Count a replacement and reset the handler age.
    pub fn record_replace(&self) {
        self.replace_total.add(1, &self.attributes);
        let since_start = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_replace_ms.store(since_start, Ordering::Relaxed);
    }

    /// Count a handler rejected by validation.
    pub fn record_validation_failure(&self) {
        self.validation_failures.add(1, &self.attributes);
    }

    /// Update the number of active subscribers.
    pub fn update_subscriber_count(&self, count: usize) {
        self.active_subscribers
            .record(i64::try_from(count).unwrap_or(i64::MAX), &self.attributes);
    }

    /// How long the current handler has been installed.
    pub fn handler_age(&self) -> Duration {
        let installed = Duration::from_millis(self.last_replace_ms.load(Ordering::Relaxed));
        self.started.elapsed().saturating_sub(installed)
    }

    /// Record the handler age gauge.
    ///
    /// The cell calls this on every dispatch and replacement. Call it yourself
    /// to keep the gauge fresh on a cell that sees no traffic.
    pub fn update_handler_age(&self) {
        let age_secs = i64::try_from(self.handler_age().as_secs()).unwrap_or(i64::MAX);
        self.handler_age_seconds.record(age_secs, &self.attributes);
    }
}

impl std::fmt::Debug for HandlerMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerMetrics")
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
