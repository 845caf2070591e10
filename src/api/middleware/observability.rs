//! Observability middleware.
//!
//! Tracing subscriber setup and the HTTP trace layer.

use std::env;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Initialize the tracing subscriber.
///
/// RUST_LOG controls the log level (default: info). Output goes to stderr
/// without ANSI colors; set LOG_FORMAT=json for structured output.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Report the observability configuration.
///
/// Checks for OTEL_SERVICE_NAME and OTEL_EXPORTER_OTLP_ENDPOINT environment
/// variables. Export is not wired up; only local tracing output is produced.
pub fn init_observability() {
    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "spellbook-server".to_string());

    match env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) => info!(
            "OTLP endpoint {} configured for {} but export is not enabled - using local tracing",
            endpoint, service_name
        ),
        Err(_) => info!(
            "Observability initialized for {} (set OTEL_EXPORTER_OTLP_ENDPOINT to enable export)",
            service_name
        ),
    }
}

/// HTTP request tracing layer.
pub fn create_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
