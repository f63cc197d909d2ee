//! The ledger page listing a user's transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    auth::UserID,
    category::CategoryKind,
    endpoints,
    html::{
        BADGE_EXPENSE_STYLE, BADGE_INCOME_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
        format_currency,
    },
    navigation::NavBar,
    transaction::{LedgerRow, get_ledger},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the ledger page, newest transactions first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let ledger = get_ledger(user_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve ledger: {error}"))?;

    Ok(transactions_view(&ledger).into_response())
}

/// Format an amount with the sign convention of its category kind,
/// e.g. "-$42.50" for an expense and "+$1,000.00" for income.
fn signed_amount(amount: f64, kind: CategoryKind) -> String {
    match kind {
        CategoryKind::Expense => format_currency(-amount.abs()),
        CategoryKind::Income => format!("+{}", format_currency(amount.abs())),
    }
}

fn amount_class(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Expense => "text-red-700 dark:text-red-300 font-bold",
        CategoryKind::Income => "text-green-700 dark:text-green-300 font-bold",
    }
}

fn category_badge(row: &LedgerRow) -> Markup {
    let style = match row.category_kind {
        CategoryKind::Income => BADGE_INCOME_STYLE,
        CategoryKind::Expense => BADGE_EXPENSE_STYLE,
    };

    html!( span class=(style) { (row.category_name) } )
}

fn truncated_description(description: &str) -> String {
    let grapheme_count = description.graphemes(true).count();

    if grapheme_count <= MAX_DESCRIPTION_GRAPHEMES {
        description.to_owned()
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES)
            .collect();
        format!("{truncated}…")
    }
}

fn transaction_row_view(row: &LedgerRow) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, row.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, row.id);
    let description = if row.description.is_empty() {
        "-".to_owned()
    } else {
        truncated_description(&row.description)
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                (row.date)
            }

            td class=(TABLE_CELL_STYLE)
            {
                (category_badge(row))
            }

            td class=(TABLE_CELL_STYLE)
            {
                (description)
            }

            td class={ (TABLE_CELL_STYLE) " " (amount_class(row.category_kind)) }
            {
                (signed_amount(row.amount, row.category_kind))
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(
                        &edit_url,
                        &delete_url,
                        "Delete this record?",
                        "closest tr",
                        "delete",
                    ))
                }
            }
        }
    )
}

fn transactions_view(ledger: &[LedgerRow]) -> Markup {
    let create_transaction_route = endpoints::NEW_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Financial History" }

                    a href=(create_transaction_route) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Category"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Description"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in ledger {
                                (transaction_row_view(row))
                            }

                            @if ledger.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions found. Add one to start tracking!"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}
