//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};

/// The maximum number of body bytes to log at the `info` level.
///
/// Longer bodies are truncated and logged in full at the `debug` level.
const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The form fields whose values must never reach the logs.
const REDACTED_FIELDS: [&str; 2] = ["password", "confirm_password"];

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// Password fields in form submissions are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = split_request(request).await;

    let is_form_post = parts.method == axum::http::Method::POST
        && parts.headers.get(CONTENT_TYPE)
            == Some(&"application/x-www-form-urlencoded".parse().unwrap());

    if is_form_post {
        let mut display_text = body_text.clone();
        for field_name in REDACTED_FIELDS {
            display_text = redact_field(&display_text, field_name);
        }
        log_request(&parts, &display_text);
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = split_response(response).await;
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

fn redact_field(form_text: &str, field_name: &str) -> String {
    let start = match form_text.find(&format!("{field_name}=")) {
        Some(position) => position,
        None => return form_text.to_string(),
    };

    let end = form_text[start..]
        .find('&')
        .map(|relative_end| start + relative_end)
        .unwrap_or(form_text.len());
    let field = &form_text[start..end];

    form_text.replace(field, &format!("{field_name}=********"))
}

async fn split_request(request: Request) -> (axum::http::request::Parts, String) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn split_response(response: Response) -> (axum::http::response::Parts, String) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod redaction_tests {
    use super::redact_field;

    #[test]
    fn redacts_password_in_middle_of_form() {
        let form_text = "email=foo%40bar.baz&password=hunter2&remember_me=on";

        let redacted = redact_field(form_text, "password");

        assert_eq!(redacted, "email=foo%40bar.baz&password=********&remember_me=on");
    }

    #[test]
    fn redacts_password_at_end_of_form() {
        let form_text = "email=foo%40bar.baz&password=hunter2";

        let redacted = redact_field(form_text, "password");

        assert_eq!(redacted, "email=foo%40bar.baz&password=********");
    }

    #[test]
    fn leaves_form_without_field_unchanged() {
        let form_text = "amount=12.30&date=2024-01-10";

        let redacted = redact_field(form_text, "password");

        assert_eq!(redacted, form_text);
    }
}
