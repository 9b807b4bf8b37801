//! Request logging with the resolved caller
//!
//! Runs outside the handlers: resolves the caller once, stores it in the
//! request extensions for [`CurrentCaller`](super::CurrentCaller), and logs
//! one line when the request arrives and one when it completes. Bearer
//! tokens never reach the logs.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::info;

use super::caller::resolve_caller;
use crate::api::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log each request with its caller, route, status and latency.
/// `TraceLayer` owns the span; this only emits events inside it.
pub async fn logging_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = matched_route(&request);
    let request_id = header_value(request.headers(), REQUEST_ID_HEADER).unwrap_or("-").to_string();
    let credentials = describe_credentials(request.headers());

    // Unresolvable credentials are left for the extractor to reject
    let caller = match resolve_caller(request.headers(), &state).await {
        Ok(caller) => {
            let identifier = caller.identifier();
            request.extensions_mut().insert(caller);
            identifier
        }
        Err(_) => "rejected".to_string(),
    };

    info!(
        method = %method,
        route = %route,
        request_id = %request_id,
        caller = %caller,
        credentials = credentials,
        content_type = header_value(request.headers(), header::CONTENT_TYPE.as_str()).unwrap_or("-"),
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %request_id,
        caller = %caller,
        "Request completed"
    );

    response
}

/// Route template (`/teams/{id}/`), falling back to the raw path
fn matched_route(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Scheme of the presented credentials, without the token itself
fn describe_credentials(headers: &HeaderMap) -> &'static str {
    match headers.get(header::AUTHORIZATION).map(|v| v.to_str()) {
        None => "none",
        Some(Ok(value)) if value.starts_with("Bearer ") => "bearer",
        Some(_) => "malformed",
    }
}
