//! Database initialization for the application's domain models.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    auth::create_user_table, category::create_category_table,
    transaction::create_transaction_table,
};

/// Create the tables for the application's domain models.
///
/// Tables are created inside a single exclusive transaction so that a
/// half-initialized database is never left behind.
///
/// # Errors
/// Returns an error if a table could not be created or the transaction
/// could not be committed.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
