//! TraceLayer span maker that keeps credentials and email addresses out of logs.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values must be redacted in logs.
const SENSITIVE_PARAMS: &[&str] = &["token", "access_token", "password", "old_password"];

/// A `MakeSpan` that logs a sanitized URI: sensitive query values are
/// redacted and path segments holding an email address are masked.
#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let sanitized = sanitize_uri(request.uri());

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %sanitized,
            version = ?request.version(),
        )
    }
}

/// `/api/order/byEmail/jan@example.com?token=abc` becomes
/// `/api/order/byEmail/[EMAIL]?token=[REDACTED]`
fn sanitize_uri(uri: &axum::http::Uri) -> String {
    let path = uri
        .path()
        .split('/')
        .map(|segment| {
            if segment.contains('@') || segment.contains("%40") {
                "[EMAIL]"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    let query = match uri.query() {
        Some(q) => q,
        None => return path,
    };

    let sanitized_pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", path, sanitized_pairs.join("&"))
}
