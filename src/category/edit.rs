//! Category editing page and endpoint.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    category::{
        CategoryFormData, CategoryId, CategoryKind, CategoryName, create::category_kind_select,
        get_owned_category, update_category,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the edit category page.
#[derive(Debug, Clone)]
pub struct EditCategoryPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category editing page.
///
/// A category that does not exist or belongs to another user renders the
/// 404 page, never a 403.
pub async fn get_edit_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_owned_category(category_id, user_id, &connection)?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id);

    Ok(edit_category_view(
        &edit_endpoint,
        &update_endpoint,
        category.name.as_ref(),
        category.kind,
        "",
    )
    .into_response())
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = get_owned_category(category_id, user_id, &connection) {
        return error.into_alert_response();
    }

    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id);

    let name = match CategoryName::new(&form_data.name) {
        Ok(name) => name,
        Err(error) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                edit_category_form_view(
                    &update_endpoint,
                    &form_data.name,
                    None,
                    &format!("Error: {error}"),
                ),
            )
                .into_response();
        }
    };

    let kind = match CategoryKind::from_str(&form_data.kind) {
        Ok(kind) => kind,
        Err(error) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                edit_category_form_view(
                    &update_endpoint,
                    &form_data.name,
                    None,
                    &format!("Error: {error}"),
                ),
            )
                .into_response();
        }
    };

    match update_category(category_id, name, kind, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingCategory) => Error::UpdateMissingCategory.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_category_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    category_name: &str,
    category_kind: CategoryKind,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_category_form_view(
        update_endpoint,
        category_name,
        Some(category_kind),
        error_message,
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Category", &[], &content)
}

fn edit_category_form_view(
    update_category_endpoint: &str,
    category_name: &str,
    category_kind: Option<CategoryKind>,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_category_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Category" }

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
                    value=(category_name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (category_kind_select(category_kind))

            @if !error_message.is_empty() {
                p
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Category" }
        }
    }
}

#[cfg(test)]
mod edit_category_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;

    use crate::{
        Error, UserID,
        category::{
            CategoryFormData, CategoryKind, CategoryName, create_category,
            edit::{EditCategoryPageState, UpdateCategoryEndpointState},
            get_category, get_edit_category_page, update_category_endpoint,
        },
        endpoints,
        test_utils::{
            assert_form_input_with_value, assert_hx_endpoint, assert_hx_redirect,
            assert_valid_html, create_test_user, get_test_db_connection, must_get_form,
            parse_html_document,
        },
    };

    fn setup() -> (Arc<Mutex<Connection>>, UserID, crate::category::Category) {
        let connection = get_test_db_connection();
        let user = create_test_user("foo@bar.baz", &connection);
        let category = create_category(
            CategoryName::new_unchecked("Groceries"),
            CategoryKind::Expense,
            user.id,
            &connection,
        )
        .expect("Could not create test category");

        (Arc::new(Mutex::new(connection)), user.id, category)
    }

    #[tokio::test]
    async fn get_edit_category_page_succeeds() {
        let (connection, user_id, category) = setup();
        let state = EditCategoryPageState {
            db_connection: connection,
        };

        let response = get_edit_category_page(Path(category.id), State(state), Extension(user_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::PUT_CATEGORY, category.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "name", "text", "Groceries");
    }

    #[tokio::test]
    async fn get_edit_category_page_hides_other_users_category() {
        let (connection, _owner_id, category) = setup();
        let other_user = create_test_user("qux@bar.baz", &connection.lock().unwrap());
        let state = EditCategoryPageState {
            db_connection: connection,
        };

        let result =
            get_edit_category_page(Path(category.id), State(state), Extension(other_user.id)).await;

        assert_eq!(result.err(), Some(Error::CategoryNotFound));
    }

    #[tokio::test]
    async fn update_category_endpoint_succeeds() {
        let (connection, user_id, category) = setup();
        let state = UpdateCategoryEndpointState {
            db_connection: connection.clone(),
        };

        let form = CategoryFormData {
            name: "Food".to_string(),
            kind: "income".to_string(),
        };

        let response =
            update_category_endpoint(Path(category.id), State(state), Extension(user_id), Form(form))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);

        let updated = get_category(category.id, &connection.lock().unwrap()).unwrap();
        assert_eq!(updated.name.as_ref(), "Food");
        assert_eq!(updated.kind, CategoryKind::Income);
    }

    #[tokio::test]
    async fn update_category_endpoint_hides_other_users_category() {
        let (connection, _owner_id, category) = setup();
        let other_user = create_test_user("qux@bar.baz", &connection.lock().unwrap());
        let state = UpdateCategoryEndpointState {
            db_connection: connection,
        };

        let form = CategoryFormData {
            name: "Hijacked".to_string(),
            kind: "expense".to_string(),
        };

        let response = update_category_endpoint(
            Path(category.id),
            State(state),
            Extension(other_user.id),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_category_endpoint_with_empty_name_returns_error() {
        let (connection, user_id, category) = setup();
        let state = UpdateCategoryEndpointState {
            db_connection: connection,
        };

        let form = CategoryFormData {
            name: "".to_string(),
            kind: "expense".to_string(),
        };

        let response =
            update_category_endpoint(Path(category.id), State(state), Extension(user_id), Form(form))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
