//! Database operations for transactions.

use std::str::FromStr;

use rusqlite::{Connection, Row, params, types::Type};
use time::Date;

use crate::{
    Error,
    auth::UserID,
    category::{CategoryId, CategoryKind, CategoryName},
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Insert a transaction and return it with its generated ID.
///
/// The caller is responsible for validating the fields and confirming that
/// the category belongs to the same user first.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (amount, date, description, category_id, user_id)
            VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new_transaction.amount,
            new_transaction.date,
            new_transaction.description,
            new_transaction.category_id,
            new_transaction.user_id.as_i64(),
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        user_id: new_transaction.user_id,
        category_id: new_transaction.category_id,
        amount: new_transaction.amount,
        date: new_transaction.date,
        description: new_transaction.description,
    })
}

/// Retrieve a single transaction by ID, regardless of owner.
///
/// Handlers acting on behalf of a user should follow this with
/// [Transaction::check_owner].
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category_id, user_id \
            FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// A transaction joined with its category for the ledger page.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub id: TransactionId,
    pub amount: f64,
    pub date: Date,
    pub description: String,
    pub category_name: CategoryName,
    pub category_kind: CategoryKind,
}

/// Retrieve a user's ledger, newest first.
///
/// Rows are sorted by date descending, then by ID so that rows sharing a
/// date keep a stable order across updates.
pub fn get_ledger(user_id: UserID, connection: &Connection) -> Result<Vec<LedgerRow>, Error> {
    connection
        .prepare(
            "SELECT \"transaction\".id, amount, date, description, category.name, category.kind \
            FROM \"transaction\" \
            INNER JOIN category ON \"transaction\".category_id = category.id \
            WHERE \"transaction\".user_id = :user_id \
            ORDER BY date DESC, \"transaction\".id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            let raw_kind: String = row.get(5)?;
            let category_kind = CategoryKind::from_str(&raw_kind).map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
            })?;

            let raw_name: String = row.get(4)?;

            Ok(LedgerRow {
                id: row.get(0)?,
                amount: row.get(1)?,
                date: row.get(2)?,
                description: row.get(3)?,
                category_name: CategoryName::new_unchecked(&raw_name),
                category_kind,
            })
        })?
        .map(|maybe_row| maybe_row.map_err(Error::SqlError))
        .collect()
}

/// Replace every editable field of a transaction.
///
/// Returns an error if the transaction doesn't exist. The caller is
/// responsible for the ownership checks on both the transaction and the
/// new category.
pub fn update_transaction(
    id: TransactionId,
    category_id: CategoryId,
    amount: f64,
    date: Date,
    description: &str,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\" \
        SET amount = ?1, date = ?2, description = ?3, category_id = ?4 \
        WHERE id = ?5",
        params![amount, date, description, category_id, id],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete a transaction by ID. Returns an error if the transaction doesn't exist.
///
/// A repeated delete of the same ID reports the missing row rather than
/// silently succeeding.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Initialize the transaction table and indexes.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_id_date ON \"transaction\"(user_id, date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        user_id: UserID::new(row.get(5)?),
    })
}
