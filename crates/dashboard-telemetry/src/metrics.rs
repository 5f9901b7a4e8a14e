//! Prometheus counters for the dashboard core.
//!
//! All metrics follow the naming convention: `ud_<component>_<metric>_total`

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // EVENT BUS
    // =========================================================================

    /// Emits performed on the bus
    pub static ref BUS_EVENTS_EMITTED: IntCounter = IntCounter::new(
        "ud_bus_events_emitted_total",
        "Total number of events emitted on the dashboard bus"
    ).expect("metric creation failed");

    /// Handlers that returned an error or panicked
    pub static ref BUS_HANDLER_FAILURES: IntCounter = IntCounter::new(
        "ud_bus_handler_failures_total",
        "Total number of bus handler failures suppressed during emit"
    ).expect("metric creation failed");

    // =========================================================================
    // FEATURE REGISTRY
    // =========================================================================

    /// Features mounted
    pub static ref FEATURES_MOUNTED: IntCounter = IntCounter::new(
        "ud_features_mounted_total",
        "Total number of features mounted"
    ).expect("metric creation failed");

    /// Features skipped, by reason
    pub static ref FEATURES_SKIPPED: IntCounterVec = IntCounterVec::new(
        Opts::new("ud_features_skipped_total", "Total number of features skipped"),
        &["reason"]  // reason: page/predicate_false/predicate_failed
    ).expect("metric creation failed");

    /// Suppressed feature failures, by lifecycle stage
    pub static ref FEATURE_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("ud_feature_failures_total", "Total number of suppressed feature failures"),
        &["stage"]  // stage: when/mount/async_mount/unmount
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics already registered are kept.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Bus
        Box::new(BUS_EVENTS_EMITTED.clone()),
        Box::new(BUS_HANDLER_FAILURES.clone()),
        // Registry
        Box::new(FEATURES_MOUNTED.clone()),
        Box::new(FEATURES_SKIPPED.clone()),
        Box::new(FEATURE_FAILURES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Bring the bus counters up to the bus's own running totals.
pub fn record_bus_totals(events_emitted: u64, handler_failures: u64) {
    BUS_EVENTS_EMITTED.inc_by(events_emitted.saturating_sub(BUS_EVENTS_EMITTED.get()));
    BUS_HANDLER_FAILURES.inc_by(handler_failures.saturating_sub(BUS_HANDLER_FAILURES.get()));
}

pub fn record_mounted(count: usize) {
    FEATURES_MOUNTED.inc_by(count as u64);
}

pub fn record_skipped(reason: &str) {
    crate::metric_inc!(FEATURES_SKIPPED, &[reason]);
}

pub fn record_failure(stage: &str) {
    crate::metric_inc!(FEATURE_FAILURES, &[stage]);
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_twice_is_ok() {
        register_metrics().unwrap();
        register_metrics().unwrap();
    }

    #[test]
    fn test_bus_totals_never_go_backwards() {
        record_bus_totals(5, 1);
        let emitted = BUS_EVENTS_EMITTED.get();
        assert!(emitted >= 5);
        record_bus_totals(2, 0);
        assert_eq!(BUS_EVENTS_EMITTED.get(), emitted);
    }

    #[test]
    fn test_labelled_counters_in_exposition() {
        register_metrics().unwrap();
        record_mounted(3);
        record_skipped("page");
        record_failure("mount");

        let text = encode_metrics().unwrap();
        assert!(text.contains("ud_features_mounted_total"));
        assert!(text.contains("ud_features_skipped_total{reason=\"page\"}"));
        assert!(text.contains("ud_feature_failures_total{stage=\"mount\"}"));
    }
}
