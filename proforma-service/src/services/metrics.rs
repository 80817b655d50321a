//! Prometheus metrics for proforma-service.
//!
//! HTTP request metrics go through the `metrics` facade (recorded by the
//! service-core middleware); service metrics live in the default
//! `prometheus` registry. `/metrics` renders both.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter_vec, CounterVec,
    HistogramVec, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "proforma_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Records created, by kind (client, vendor, item, invoice) and mode.
pub static RECORDS_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "proforma_records_created_total",
        "Total number of records created by kind",
        &["kind", "mode"] // mode: database, demo
    )
    .expect("Failed to register records_created_total")
});

/// Invoice amount counter by currency and mode. Demo invoices are never
/// stored, so dashboards should select `mode="database"`.
pub static INVOICE_AMOUNT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "proforma_invoice_amount_total",
        "Total invoiced amount including VAT by currency",
        &["currency", "mode"]
    )
    .expect("Failed to register invoice_amount_total")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "proforma_errors_total",
        "Total number of errors by type",
        &["error_type"]
    )
    .expect("Failed to register errors_total")
});

/// Install the `metrics` recorder and register service metrics.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        // Another recorder may already be installed in this process.
        let _ = metrics::set_global_recorder(recorder);
        handle
    });

    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&RECORDS_CREATED_TOTAL);
    Lazy::force(&INVOICE_AMOUNT_TOTAL);
    Lazy::force(&ERRORS_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| {
            handle.run_upkeep();
            handle.render()
        })
        .unwrap_or_default();

    let encoder = TextEncoder::new();
    if let Ok(custom) = encoder.encode_to_string(&prometheus::gather()) {
        output.push_str(&custom);
    }

    output
}
