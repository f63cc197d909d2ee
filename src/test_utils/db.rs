use std::str::FromStr;

use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{PasswordHash, User, auth::create_user, db::initialize};

/// An in-memory database with all the application tables created.
pub(crate) fn get_test_db_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize test database");

    connection
}

/// Insert a user with a fixed (unhashed) password for tests that never log in.
pub(crate) fn create_test_user(email: &str, connection: &Connection) -> User {
    create_user(
        EmailAddress::from_str(email).expect("invalid test email"),
        PasswordHash::new_unchecked("hunter2"),
        connection,
    )
    .expect("Could not create test user")
}
