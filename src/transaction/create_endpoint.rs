//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    category::get_owned_category,
    endpoints,
    transaction::{
        NewTransaction, TransactionForm, create_transaction, validate_amount,
        validate_description,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the ledger on success.
///
/// The referenced category must exist and belong to the requesting user,
/// otherwise the request fails with a 404 so that other users' category
/// IDs cannot be probed.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(error) = validate_amount(form.amount) {
        return error.into_alert_response();
    }

    if let Err(error) = validate_description(&form.description) {
        return error.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let category = match get_owned_category(form.category_id, user_id, &connection) {
        Ok(category) => category,
        Err(error) => return error.into_alert_response(),
    };

    let new_transaction = NewTransaction {
        user_id,
        category_id: category.id,
        amount: form.amount,
        date: form.date,
        description: form.description,
    };

    if let Err(error) = create_transaction(new_transaction, &connection) {
        tracing::error!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        body::Body,
        extract::State,
        http::{Response, StatusCode},
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::{
        User,
        category::{Category, CategoryKind, CategoryName, create_category},
        test_utils::{create_test_user, get_test_db_connection},
        transaction::{TransactionForm, create_transaction_endpoint, get_transaction},
    };

    use super::CreateTransactionState;

    fn get_state_with_user_and_category() -> (CreateTransactionState, User, Category) {
        let connection = get_test_db_connection();
        let user = create_test_user("foo@bar.baz", &connection);
        let category = create_category(
            CategoryName::new_unchecked("Food"),
            CategoryKind::Expense,
            user.id,
            &connection,
        )
        .expect("Could not create test category");

        (
            CreateTransactionState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user,
            category,
        )
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, user, category) = get_state_with_user_and_category();

        let form = TransactionForm {
            category_id: category.id,
            amount: 42.5,
            date: date!(2024 - 01 - 10),
            description: "lunch".to_string(),
        };

        let response =
            create_transaction_endpoint(State(state.clone()), Extension(user.id), Form(form))
                .await
                .into_response();

        assert_redirects_to_transactions_view(response);

        // Verify the transaction was actually created by getting it by ID
        // We know the first transaction will have ID 1
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.amount, 42.5);
        assert_eq!(transaction.description, "lunch");
        assert_eq!(transaction.user_id, user.id);
        assert_eq!(transaction.category_id, category.id);
    }

    #[tokio::test]
    async fn can_create_transaction_for_one_cent() {
        let (state, user, category) = get_state_with_user_and_category();

        let form = TransactionForm {
            category_id: category.id,
            amount: 0.01,
            date: date!(2024 - 01 - 10),
            description: String::new(),
        };

        let response =
            create_transaction_endpoint(State(state.clone()), Extension(user.id), Form(form))
                .await
                .into_response();

        assert_redirects_to_transactions_view(response);
    }

    #[tokio::test]
    async fn create_transaction_fails_on_zero_amount() {
        let (state, user, category) = get_state_with_user_and_category();

        let form = TransactionForm {
            category_id: category.id,
            amount: 0.0,
            date: date!(2024 - 01 - 10),
            description: String::new(),
        };

        let response = create_transaction_endpoint(State(state), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_transaction_fails_on_negative_amount() {
        let (state, user, category) = get_state_with_user_and_category();

        let form = TransactionForm {
            category_id: category.id,
            amount: -5.0,
            date: date!(2024 - 01 - 10),
            description: String::new(),
        };

        let response = create_transaction_endpoint(State(state), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_transaction_fails_on_too_long_description(){
        let (state, user, category) = get_state_with_user_and_category();

        let form = TransactionForm {
            category_id: category.id,
            amount: 1.0,
            date: date!(2024 - 01 - 10),
            description: "a".repeat(256),
        };

        let response = create_transaction_endpoint(State(state), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_transaction_fails_on_missing_category() {
        let (state, user, category) = get_state_with_user_and_category();

        let form = TransactionForm {
            category_id: category.id + 999,
            amount: 1.0,
            date: date!(2024 - 01 - 10),
            description: String::new(),
        };

        let response = create_transaction_endpoint(State(state), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_transaction_fails_on_other_users_category() {
        let (state, _owner, category) = get_state_with_user_and_category();
        let other_user = create_test_user("qux@bar.baz", &state.db_connection.lock().unwrap());

        let form = TransactionForm {
            category_id: category.id,
            amount: 1.0,
            date: date!(2024 - 01 - 10),
            description: String::new(),
        };

        let response =
            create_transaction_endpoint(State(state.clone()), Extension(other_user.id), Form(form))
                .await
                .into_response();

        // The existing category must be indistinguishable from a missing one.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
