//! Transaction editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    category::{Category, get_categories_by_user, get_owned_category},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
    transaction::{
        Transaction, TransactionForm, TransactionId, form::transaction_form_fields,
        get_transaction, update_transaction, validate_amount, validate_description,
    },
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for fetching the transaction and categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the transaction editing page, pre-filled with the stored fields.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the transaction does not exist, and an
/// [Error::Forbidden] if it belongs to another user.
pub async fn get_edit_transaction_page(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<EditTransactionPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, &connection)?;
    transaction.check_owner(user_id)?;

    let available_categories = get_categories_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(edit_transaction_view(&transaction, &available_categories).into_response())
}

/// Handle transaction update form submission.
///
/// Every editable field is replaced with the submitted value, an omitted
/// description clears the stored one. The new category must belong to the
/// requesting user.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<UpdateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let transaction = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => return Error::UpdateMissingTransaction.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not fetch transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = transaction.check_owner(user_id) {
        return error.into_alert_response();
    }

    if let Err(error) = validate_amount(form.amount) {
        return error.into_alert_response();
    }

    if let Err(error) = validate_description(&form.description) {
        return error.into_alert_response();
    }

    let category = match get_owned_category(form.category_id, user_id, &connection) {
        Ok(category) => category,
        Err(error) => return error.into_alert_response(),
    };

    match update_transaction(
        transaction_id,
        category.id,
        form.amount,
        form.date,
        &form.description,
        &connection,
    ) {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_transaction_view(transaction: &Transaction, available_categories: &[Category]) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_TRANSACTION, transaction.id);
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let spinner = loading_spinner();

    let fields = transaction_form_fields(
        transaction.date,
        Some(transaction.amount),
        &transaction.description,
        Some(transaction.category_id),
        available_categories,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Update Transaction"
                }
            }
        }
    };

    base("Edit Transaction", &[dollar_input_styles()], &content)
}
