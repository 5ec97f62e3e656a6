//! Per-request trace spans

use axum::body::Body;
use http::{Request, Response, StatusCode};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier},
    trace::{
        DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer,
    },
};
use tracing::{debug_span, info_span, Span};
use uuid::Uuid;

const HEALTH_PATH: &str = "/health";

pub fn logging_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
    DefaultOnBodyChunk,
    DefaultOnEos,
    impl OnFailure<ServerErrorsFailureClass> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = Uuid::new_v4();
            let path = request.uri().path();
            // Liveness checks stay below the default filter.
            if path == HEALTH_PATH {
                debug_span!("health_check", %request_id)
            } else {
                info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    path = %path,
                    status = tracing::field::Empty,
                )
            }
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::debug!("{} {}", request.method(), request.uri().path());
        })
        .on_response(|response: &Response<Body>, latency: Duration, span: &Span| {
            let status = response.status();
            span.record("status", status.as_u16());
            let latency_ms = latency.as_millis();

            match status {
                // A disabled span here is a filtered-out health check.
                s if s.is_success() || s.is_redirection() => {
                    if !span.is_disabled() {
                        tracing::info!(latency_ms, "request completed");
                    }
                }
                StatusCode::UNPROCESSABLE_ENTITY => {
                    tracing::info!(latency_ms, "form rejected by validation");
                }
                StatusCode::BAD_GATEWAY => {
                    tracing::warn!(latency_ms, "upstream API failed the request");
                }
                s if s.is_client_error() => {
                    tracing::warn!(status = s.as_u16(), latency_ms, "client error response");
                }
                s => {
                    tracing::error!(status = s.as_u16(), latency_ms, "server error response");
                }
            }
        })
        .on_failure(|error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
            tracing::error!(latency_ms = latency.as_millis(), error = %error, "request failed");
        })
}
