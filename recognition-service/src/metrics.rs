use actix_web::{HttpResponse, Responder};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, TextEncoder};

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

fn register_counter(name: &str, help: &str) -> IntCounter {
    IntCounter::new(name, help)
        .and_then(|c| {
            prometheus::default_registry().register(Box::new(c.clone()))?;
            Ok(c)
        })
        .unwrap_or_else(|e| {
            tracing::error!("failed to create {} counter: {}", name, e);
            IntCounter::new(format!("dummy_{}", name), "dummy").expect("dummy counter")
        })
}

/// Counter for registration attempts (success or failure)
static REGISTER_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "register_requests_total",
        "Total number of registration requests",
    )
});

/// Counter for login attempts (success or failure)
static LOGIN_REQUESTS_TOTAL: Lazy<IntCounter> =
    Lazy::new(|| register_counter("login_requests_total", "Total number of login requests"));

/// Counter for failed logins (wrong password, unknown user, or role mismatch)
static LOGIN_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "login_failures_total",
        "Total number of failed login attempts",
    )
});

/// Counter for created shoutouts
static SHOUTOUTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "shoutouts_created_total",
        "Total number of shoutouts created",
    )
});

/// Initialize counters eagerly so they appear in /metrics before first use
pub fn init_metrics() {
    let _ = &*REGISTER_REQUESTS_TOTAL;
    let _ = &*LOGIN_REQUESTS_TOTAL;
    let _ = &*LOGIN_FAILURES_TOTAL;
    let _ = &*SHOUTOUTS_CREATED_TOTAL;
}

#[inline]
pub fn inc_register_requests() {
    REGISTER_REQUESTS_TOTAL.inc();
}

#[inline]
pub fn inc_login_requests() {
    LOGIN_REQUESTS_TOTAL.inc();
}

#[inline]
pub fn inc_login_failures() {
    LOGIN_FAILURES_TOTAL.inc();
}

#[inline]
pub fn inc_shoutouts_created() {
    SHOUTOUTS_CREATED_TOTAL.inc();
}
