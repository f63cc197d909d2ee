//! Recording and browsing the transactions that make up a user's ledger.

mod create_endpoint;
mod create_page;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use db::{
    LedgerRow, create_transaction, create_transaction_table, delete_transaction, get_ledger,
    get_transaction, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{
    MAX_DESCRIPTION_CHARS, NewTransaction, Transaction, TransactionId, validate_amount,
    validate_description,
};
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use list::get_transactions_page;

pub(crate) use domain::TransactionForm;
