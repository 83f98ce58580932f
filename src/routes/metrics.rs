use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prometheus::{Encoder, TextEncoder};

use crate::metrics::REGISTRY;

/// Custom metrics followed by the default process metrics.
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();

    let mut response = encode(&encoder, &REGISTRY.gather(), "custom");
    response.push_str(&encode(&encoder, &prometheus::gather(), "prometheus"));

    (StatusCode::OK, response).into_response()
}

fn encode(
    encoder: &TextEncoder,
    families: &[prometheus::proto::MetricFamily],
    source: &str,
) -> String {
    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(families, &mut buffer) {
        log::error!("Could not encode {source} metrics. Error: '{error}'.");
    }
    String::from_utf8(buffer).unwrap_or_else(|error| {
        log::error!("The {source} metrics are not valid utf8. Error: '{error}'.");
        String::default()
    })
}
