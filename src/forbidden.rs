//! The 403 page returned when a user touches another user's transaction.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// Build the 403 response for a record owned by a different account.
pub fn get_403_forbidden_response() -> Response {
    render(
        StatusCode::FORBIDDEN,
        error_view(
            "Forbidden",
            "403",
            "That record belongs to a different account.",
            "Head back to your own transactions.",
        ),
    )
}
