//! Category creation page and endpoint.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::UserID,
    category::{CategoryFormData, CategoryKind, CategoryName, create_category},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for the category creation page.
#[derive(Debug, Deserialize)]
pub struct NewCategoryQuery {
    /// Set when another page redirected here, e.g. "no-categories" from the
    /// new transaction page.
    pub reason: Option<String>,
}

/// Render the category creation page.
pub async fn get_new_category_page(Query(query): Query<NewCategoryQuery>) -> Response {
    let notice = match query.reason.as_deref() {
        Some("no-categories") => Some("Transactions need a category. Create your first category, then add your transaction."),
        _ => None,
    };

    new_category_view(notice).into_response()
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Form(new_category): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&new_category.name) {
        Ok(name) => name,
        Err(error) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                new_category_form_view(&format!("Error: {error}")),
            )
                .into_response();
        }
    };

    let kind = match CategoryKind::from_str(&new_category.kind) {
        Ok(kind) => kind,
        Err(error) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                new_category_form_view(&format!("Error: {error}")),
            )
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_category(name, kind, user_id, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}

fn new_category_view(notice: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = new_category_form_view("");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            @if let Some(notice) = notice {
                p class="mb-4 rounded border border-blue-300 bg-blue-50 px-4 py-3 text-sm
                    text-blue-700 dark:border-blue-700 dark:bg-blue-900 dark:text-blue-300"
                {
                    (notice)
                }
            }

            (form)
        }
    };

    base("Create Category", &[], &content)
}

pub(super) fn category_kind_select(selected: Option<CategoryKind>) -> Markup {
    html! {
        div
        {
            label
                for="kind"
                class=(FORM_LABEL_STYLE)
            {
                "Type"
            }

            select
                name="kind"
                id="kind"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for kind in [CategoryKind::Expense, CategoryKind::Income] {
                    @if Some(kind) == selected {
                        option value=(kind) selected { (kind.display_name()) }
                    } @else {
                        option value=(kind) { (kind.display_name()) }
                    }
                }
            }
        }
    }
}

fn new_category_form_view(error_message: &str) -> Markup {
    let create_category_endpoint = endpoints::POST_CATEGORY;

    html! {
        form
            hx-post=(create_category_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "New Category" }

            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Category Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (category_kind_select(None))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}


#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::State,
        http::{StatusCode, header::CONTENT_TYPE},
        response::IntoResponse,
    };
    use axum_extra::extract::Form;

    use crate::{
        category::{
            Category, CategoryFormData, CategoryKind, CategoryName, create::CreateCategoryEndpointState,
            create_category_endpoint, get_category,
        },
        endpoints,
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, create_test_user,
            get_header, get_test_db_connection, must_get_form, parse_html_fragment,
        },
    };

    fn get_category_state() -> (CreateCategoryEndpointState, crate::User) {
        let connection = get_test_db_connection();
        let user = create_test_user("foo@bar.baz", &connection);

        (
            CreateCategoryEndpointState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user,
        )
    }

    #[tokio::test]
    async fn can_create_category() {
        let (state, user) = get_category_state();
        let name = CategoryName::new_unchecked("Groceries");
        let want = Category {
            id: 1,
            name: name.clone(),
            kind: CategoryKind::Expense,
            user_id: user.id,
        };
        let form = CategoryFormData {
            name: name.to_string(),
            kind: "expense".to_string(),
        };

        let response = create_category_endpoint(State(state.clone()), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        assert_eq!(
            Ok(want),
            get_category(1, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let (state, user) = get_category_state();
        let form = CategoryFormData {
            name: "".to_string(),
            kind: "expense".to_string(),
        };

        let response = create_category_endpoint(State(state), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            get_header(&response, CONTENT_TYPE.as_str()),
            "text/html; charset=utf-8"
        );
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
    }

    #[tokio::test]
    async fn create_category_fails_on_unknown_kind() {
        let (state, user) = get_category_state();
        let form = CategoryFormData {
            name: "Groceries".to_string(),
            kind: "transfer".to_string(),
        };

        let response = create_category_endpoint(State(state), Extension(user.id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
