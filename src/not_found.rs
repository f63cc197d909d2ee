//! The 404 page returned for unknown routes and missing records.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// Route handler for unmatched paths.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response directly, for use outside of a route handler.
pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, that page or record does not exist.",
            "Check the address, or head back to your transactions.",
        ),
    )
}
