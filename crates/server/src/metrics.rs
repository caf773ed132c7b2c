use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REGISTRATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "home_services_registrations_total",
        "Total successful user registrations"
    )
    .expect("register registrations_total")
});

pub static LOGINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "home_services_logins_total",
        "Login attempts by outcome",
        &["outcome"]
    )
    .expect("register logins_total")
});

pub static ORDERS_PLACED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "home_services_orders_placed_total",
        "Total orders placed"
    )
    .expect("register orders_placed_total")
});

pub static ORDERS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "home_services_orders_deleted_total",
        "Total orders deleted"
    )
    .expect("register orders_deleted_total")
});

pub static ORDER_NOTES_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "home_services_order_notes_updated_total",
        "Total order note updates"
    )
    .expect("register order_notes_updated_total")
});

pub static REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "home_services_request_duration_seconds",
        "Request duration in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register request_duration")
});

pub fn record_login(success: bool) {
    LOGINS_TOTAL.with_label_values(&[if success { "success" } else { "failure" }]).inc();
}

/// Touch every metric so `/metrics` lists them before the first event.
pub fn init() {
    Lazy::force(&REGISTRATIONS_TOTAL);
    Lazy::force(&ORDERS_PLACED_TOTAL);
    Lazy::force(&ORDERS_DELETED_TOTAL);
    Lazy::force(&ORDER_NOTES_UPDATED_TOTAL);
    Lazy::force(&REQUEST_DURATION);
    for outcome in ["success", "failure"] {
        LOGINS_TOTAL.with_label_values(&[outcome]);
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
