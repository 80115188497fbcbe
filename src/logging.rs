//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Log the request and response for each request.
///
/// Both sides are logged at the `info` level. Bodies longer than
/// [LOG_BODY_LENGTH_LIMIT] bytes are truncated and logged in full at the
/// `debug` level. Credential-bearing headers are redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

/// Replace the values of credential-bearing headers with asterisks.
fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();

    for name in [AUTHORIZATION.as_str(), "apikey"] {
        if redacted.contains_key(name) {
            redacted.insert(name, HeaderValue::from_static("********"));
        }
    }

    redacted
}

fn truncated(body: &str) -> &str {
    body.get(..LOG_BODY_LENGTH_LIMIT).unwrap_or(body)
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    let headers = redact_headers(&parts.headers);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {} {headers:?}\nbody: {}...",
            parts.method,
            parts.uri,
            truncated(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {} {headers:?}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {} \nbody: {}...",
            parts.status,
            truncated(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {} \nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};

    use super::{redact_headers, truncated};

    #[test]
    fn credential_headers_are_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer secret"));
        headers.insert("apikey", HeaderValue::from_static("anon-key"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let redacted = redact_headers(&headers);

        assert_eq!(redacted["authorization"], "********");
        assert_eq!(redacted["apikey"], "********");
        assert_eq!(redacted["content-type"], "application/json");
    }

    #[test]
    fn truncation_never_splits_a_character() {
        // 300 bytes of three-byte characters, the limit lands mid-character
        // and the whole body is kept instead of panicking on a bad slice.
        let body = "€".repeat(100);
        assert_eq!(truncated(&body), body);
    }
}
