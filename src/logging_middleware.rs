// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::body::{to_bytes, Body};
use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::debug;

/// Bodies larger than this are summarized instead of echoed; image
/// uploads and chat attachments would otherwise flood the log.
const MAX_LOGGED_BODY_BYTES: usize = 16 * 1024;

fn is_binary_exchange(content_type: Option<&str>, path: &str) -> bool {
    if path.starts_with("/uploads/") {
        return true;
    }
    matches!(content_type, Some(ct) if ct.starts_with("multipart/") || ct.starts_with("image/"))
}

fn render_body(bytes: &[u8]) -> String {
    if bytes.len() > MAX_LOGGED_BODY_BYTES {
        return format!("<{} bytes>", bytes.len());
    }
    match std::str::from_utf8(bytes) {
        Ok(body_str) => match serde_json::from_str::<serde_json::Value>(body_str) {
            Ok(json) => {
                serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string())
            }
            Err(_) => body_str.to_string(),
        },
        Err(_) => format!("<{} non-utf8 bytes>", bytes.len()),
    }
}

/// Middleware to log request and response bodies in debug mode.
/// Binary exchanges (uploads, served images) are logged by size only.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let started = Instant::now();
    let path = request.uri().path().to_string();
    let content_type = request
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let skip_bodies = is_binary_exchange(content_type.as_deref(), &path);

    let request = if skip_bodies {
        request
    } else {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        if !bytes.is_empty() {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %render_body(&bytes),
                "Request"
            );
        }

        Request::from_parts(parts, Body::from(bytes))
    };

    let response = next.run(request).await;

    if skip_bodies {
        debug!(
            path = %path,
            status = %response.status(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Binary exchange"
        );
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            path = %path,
            status = %parts.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_body = %render_body(&bytes),
            "Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_exchange_detection() {
        assert!(is_binary_exchange(None, "/uploads/bp-1-A2B3C4.png"));
        assert!(is_binary_exchange(
            Some("multipart/form-data; boundary=x"),
            "/api/chat"
        ));
        assert!(!is_binary_exchange(
            Some("application/json"),
            "/api/servers"
        ));
        assert!(!is_binary_exchange(None, "/api/battlepass/config"));
    }

    #[test]
    fn test_large_body_is_summarized() {
        let body = vec![b'a'; MAX_LOGGED_BODY_BYTES + 1];
        assert_eq!(render_body(&body), format!("<{} bytes>", body.len()));
    }

    #[test]
    fn test_json_body_is_pretty_printed() {
        let rendered = render_body(br#"{"name":"Asylum"}"#);
        assert!(rendered.contains("\"name\": \"Asylum\""));
    }
}
