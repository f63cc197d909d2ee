//! Database operations for categories.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryId, CategoryKind, CategoryName},
};

/// Create a category owned by `user_id` and return it with its generated ID.
pub fn create_category(
    name: CategoryName,
    kind: CategoryKind,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, kind, user_id) VALUES (?1, ?2, ?3);",
        (name.as_ref(), kind.as_str(), user_id.as_i64()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        kind,
        user_id,
    })
}

/// Retrieve a single category by ID, regardless of owner.
///
/// Callers that act on behalf of a user should use [get_owned_category]
/// instead, which applies the ownership check.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, kind, user_id FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a category by ID for `user_id`.
///
/// The row is fetched first and the owner compared second, keeping the
/// authorization decision out of the SQL query.
///
/// # Errors
///
/// Returns an [Error::CategoryNotFound] when the category does not exist
/// *or* belongs to another user, so the two cases cannot be told apart.
pub fn get_owned_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let category = match get_category(category_id, connection) {
        Ok(category) => category,
        Err(Error::NotFound) => return Err(Error::CategoryNotFound),
        Err(error) => return Err(error),
    };

    category.check_owner(user_id)?;

    Ok(category)
}

/// Retrieve all of a user's categories ordered alphabetically by name.
pub fn get_categories_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, kind, user_id FROM category WHERE user_id = :user_id ORDER BY name ASC;")?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Update a category's name and kind. Returns an error if the category doesn't exist.
///
/// The caller is responsible for checking ownership first, e.g. with
/// [get_owned_category].
pub fn update_category(
    category_id: CategoryId,
    new_name: CategoryName,
    new_kind: CategoryKind,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, kind = ?2 WHERE id = ?3",
        (new_name.as_ref(), new_kind.as_str(), category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// The caller is responsible for checking ownership first. Transactions
/// recorded against the category are removed with it.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_kind: String = row.get(2)?;
    let raw_user_id: i64 = row.get(3)?;

    let kind = CategoryKind::from_str(&raw_kind).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error))
    })?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        kind,
        user_id: UserID::new(raw_user_id),
    })
}
