//! Defines the route handler for the page for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::UserID,
    category::{Category, get_categories_by_user},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::form::transaction_form_fields,
};

/// The state needed for the create new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for accessing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
///
/// A user with no categories yet is redirected to the category creation
/// page instead of being shown an empty dropdown.
pub async fn get_new_transaction_page(
    State(state): State<CreateTransactionPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let available_categories = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_categories_by_user(user_id, &connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve categories for new transaction page: {error}")
        })?
    };

    if available_categories.is_empty() {
        let redirect_url = format!("{}?reason=no-categories", endpoints::NEW_CATEGORY_VIEW);
        return Ok(Redirect::to(&redirect_url).into_response());
    }

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    Ok(create_transaction_view(today, &available_categories).into_response())
}

fn create_transaction_view(default_date: Date, available_categories: &[Category]) -> Markup {
    let create_transaction_route = endpoints::POST_TRANSACTION;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let fields = transaction_form_fields(default_date, None, "", None, available_categories);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save Transaction"
                }
            }
        }
    };

    base("Create Transaction", &[dollar_input_styles()], &content)
}
