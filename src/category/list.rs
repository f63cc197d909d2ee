//! Categories listing page.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    category::{Category, CategoryId, CategoryKind, get_categories_by_user},
    endpoints,
    html::{
        BADGE_EXPENSE_STYLE, BADGE_INCOME_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
    },
    navigation::NavBar,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A category with its formatted edit URL for template rendering.
#[derive(Debug, Clone)]
struct CategoryWithEditUrl {
    category: Category,
    edit_url: String,
    transaction_count: u32,
}

/// Render the categories listing page with transaction counts.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let transactions_per_category = count_transactions_per_category(user_id, &connection)
        .inspect_err(|error| {
            tracing::error!("Could not count transactions per category: {error}")
        })?;

    let categories_with_edit_urls = categories
        .into_iter()
        .map(|category| {
            let transaction_count = *transactions_per_category.get(&category.id).unwrap_or(&0);

            CategoryWithEditUrl {
                edit_url: endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id),
                category,
                transaction_count,
            }
        })
        .collect::<Vec<_>>();

    Ok(categories_view(&categories_with_edit_urls).into_response())
}

fn count_transactions_per_category(
    user_id: UserID,
    connection: &Connection,
) -> Result<HashMap<CategoryId, u32>, Error> {
    let result: Result<HashMap<CategoryId, u32>, rusqlite::Error> = connection
        .prepare(
            "SELECT category_id, COUNT(1) FROM \"transaction\" WHERE user_id = :user_id GROUP BY category_id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            let category_id = row.get(0)?;
            let count = row.get(1)?;

            Ok((category_id, count))
        })?
        .collect();

    result.map_err(Error::from)
}

fn kind_badge(kind: CategoryKind) -> Markup {
    let style = match kind {
        CategoryKind::Income => BADGE_INCOME_STYLE,
        CategoryKind::Expense => BADGE_EXPENSE_STYLE,
    };

    html!( span class=(style) { (kind.display_name()) } )
}

fn categories_view(categories: &[CategoryWithEditUrl]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |category_with_url: &CategoryWithEditUrl| {
        let delete_url =
            endpoints::format_endpoint(endpoints::DELETE_CATEGORY, category_with_url.category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? This will also delete its {} transaction(s).",
            category_with_url.category.name, category_with_url.transaction_count
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (category_with_url.category.name)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (kind_badge(category_with_url.category.kind))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (category_with_url.transaction_count)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &category_with_url.edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                section class="dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Name"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Type"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Transactions"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for category_with_url in categories {
                                (table_row(category_with_url))
                            }

                            @if categories.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet. "
                                        a href=(new_category_route) class=(LINK_STYLE)
                                        {
                                            "Create your first category"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}
