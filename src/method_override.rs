use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Form field / query parameter carrying the tunneled verb.
pub const OVERRIDE_FIELD: &str = "_method";

const MAX_FORM_BYTES: usize = 1024 * 1024;

/// Rewrites `POST ...?_method=PUT` (or a `_method` form field) into the
/// tunneled verb. Must wrap the router from outside so it runs before route
/// matching. Only PUT and DELETE are honoured.
pub async fn method_override(req: Request, next: Next) -> Response {
    if req.method() != Method::POST {
        return next.run(req).await;
    }

    let from_query = req.uri().query().and_then(|q| find_override(q.as_bytes()));
    let (mut parts, body) = req.into_parts();

    let (method, body) = match from_query {
        Some(method) => (Some(method), body),
        None if is_form(&parts.headers) => {
            let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("unreadable form body: {e}");
                    return StatusCode::PAYLOAD_TOO_LARGE.into_response();
                }
            };
            (find_override(&bytes), Body::from(bytes))
        }
        None => (None, body),
    };

    if let Some(method) = method {
        tracing::debug!(path = %parts.uri.path(), %method, "method override");
        parts.method = method;
    }

    next.run(Request::from_parts(parts, body)).await
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn find_override(encoded: &[u8]) -> Option<Method> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(encoded).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == OVERRIDE_FIELD)
        .and_then(|(_, value)| parse_verb(&value))
}

fn parse_verb(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_verb_among_form_fields() {
        let body = b"blog%5Btitle%5D=Hi&_method=put&blog%5Bbody%5D=x";
        assert_eq!(find_override(body), Some(Method::PUT));
    }

    #[test]
    fn ignores_unsupported_verbs() {
        assert_eq!(find_override(b"_method=PATCH"), None);
        assert_eq!(find_override(b"_method=GET"), None);
        assert_eq!(find_override(b"title=x"), None);
    }

    #[test]
    fn query_style_delete() {
        assert_eq!(find_override(b"_method=DELETE"), Some(Method::DELETE));
    }
}
