//! Pocketbook is a small self-hosted web app for tracking personal income
//! and spending.
//!
//! Users record transactions against their own income/expense categories
//! and browse them as a chronological ledger. The library serves HTML
//! pages directly over a REST-style API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod category;
mod db;
mod endpoints;
mod forbidden;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{PasswordHash, User, UserID, ValidatedPassword};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    alert::Alert,
    forbidden::get_403_forbidden_response,
    html::render,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email/password combination that does not match
    /// a registered user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email used to register already belongs to a user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A string other than "income" or "expense" was used as a category kind.
    #[error("\"{0}\" is not a valid category kind")]
    InvalidCategoryKind(String),

    /// The category referenced in a request does not exist for the
    /// requesting user.
    ///
    /// This error is also returned when the category exists but belongs to
    /// another user, so that category IDs cannot be probed across accounts.
    #[error("the category could not be found")]
    CategoryNotFound,

    /// A zero or negative amount was used to create or update a transaction.
    #[error("{0} is not a valid amount, it must be greater than zero")]
    InvalidAmount(f64),

    /// A transaction description exceeded the maximum length.
    #[error("the description is {0} characters long, which is over the limit")]
    DescriptionTooLong(usize),

    /// The requested row exists but belongs to another user.
    #[error("the requested resource belongs to another user")]
    Forbidden,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist.
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a category that does not exist.
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist.
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::CategoryNotFound => get_404_not_found_response(),
            Error::Forbidden => get_403_forbidden_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                })
            }
            Error::DatabaseLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::CategoryNotFound => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Category not found",
                    "Choose one of your own categories, or create a new one first.",
                )
                .into_markup(),
            ),
            Error::Forbidden => render(
                StatusCode::FORBIDDEN,
                Alert::error("Not allowed", "This record belongs to a different account.")
                    .into_markup(),
            ),
            Error::InvalidAmount(amount) => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                )
                .into_markup(),
            ),
            Error::DescriptionTooLong(length) => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error(
                    "Description too long",
                    &format!(
                        "The description is {length} characters long. \
                        Shorten it to 255 characters or fewer."
                    ),
                )
                .into_markup(),
            ),
            Error::EmptyCategoryName => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error("Invalid category name", "Category names cannot be empty.")
                    .into_markup(),
            ),
            Error::InvalidCategoryKind(kind) => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error(
                    "Invalid category kind",
                    &format!("\"{kind}\" is not a category kind, use income or expense."),
                )
                .into_markup(),
            ),
            Error::UpdateMissingTransaction => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                )
                .into_markup(),
            ),
            Error::DeleteMissingTransaction => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_markup(),
            ),
            Error::UpdateMissingCategory => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update category",
                    "The category could not be found.",
                )
                .into_markup(),
            ),
            Error::DeleteMissingCategory => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete category",
                    "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted.",
                )
                .into_markup(),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_markup(),
            ),
        }
    }
}
