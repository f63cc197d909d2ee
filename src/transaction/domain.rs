//! Core transaction domain types and field validation.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, auth::UserID, category::CategoryId};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// The maximum number of characters allowed in a transaction description.
pub const MAX_DESCRIPTION_CHARS: usize = 255;

/// A single entry in a user's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserID,
    pub category_id: CategoryId,
    pub amount: f64,
    pub date: Date,
    pub description: String,
}

impl Transaction {
    /// Check that `user_id` owns this transaction.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Forbidden] when the owner differs. Unlike
    /// categories, the existence of a transaction ID is not treated as a
    /// secret, so the caller learns the row exists but is off limits.
    pub fn check_owner(&self, user_id: UserID) -> Result<(), Error> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(Error::Forbidden)
        }
    }
}

/// The fields needed to insert a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: UserID,
    pub category_id: CategoryId,
    pub amount: f64,
    pub date: Date,
    pub description: String,
}

/// The form data for creating or updating a transaction.
///
/// These named fields double as the whitelist of editable fields, any
/// extra fields a client submits are dropped during deserialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The category the transaction belongs to.
    pub category_id: CategoryId,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction. An omitted field clears the stored
    /// description.
    #[serde(default)]
    pub description: String,
}

/// Check that `amount` is a positive, finite number of dollars.
///
/// # Errors
///
/// Returns an [Error::InvalidAmount] for zero, negative, NaN and infinite amounts.
pub fn validate_amount(amount: f64) -> Result<(), Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

/// Check that `description` fits within [MAX_DESCRIPTION_CHARS].
///
/// An empty description is valid, the field is optional.
///
/// # Errors
///
/// Returns an [Error::DescriptionTooLong] with the actual character count.
pub fn validate_description(description: &str) -> Result<(), Error> {
    let char_count = description.chars().count();

    if char_count > MAX_DESCRIPTION_CHARS {
        Err(Error::DescriptionTooLong(char_count))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod validate_amount_tests {
    use crate::Error;

    use super::validate_amount;

    #[test]
    fn accepts_one_cent() {
        assert_eq!(validate_amount(0.01), Ok(()));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(validate_amount(0.0), Err(Error::InvalidAmount(0.0)));
    }

    #[test]
    fn rejects_negative_amount() {
        assert_eq!(validate_amount(-42.5), Err(Error::InvalidAmount(-42.5)));
    }

    #[test]
    fn rejects_nan() {
        assert!(matches!(
            validate_amount(f64::NAN),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_infinity() {
        assert!(matches!(
            validate_amount(f64::INFINITY),
            Err(Error::InvalidAmount(_))
        ));
    }
}


#[cfg(test)]
mod check_owner_tests {
    use time::macros::date;

    use crate::{Error, auth::UserID};

    use super::Transaction;

    fn test_transaction(user_id: UserID) -> Transaction {
        Transaction {
            id: 1,
            user_id,
            category_id: 1,
            amount: 42.5,
            date: date!(2024 - 01 - 10),
            description: "lunch".to_owned(),
        }
    }

    #[test]
    fn owner_passes() {
        let transaction = test_transaction(UserID::new(1));

        assert_eq!(transaction.check_owner(UserID::new(1)), Ok(()));
    }

    #[test]
    fn other_user_is_forbidden() {
        let transaction = test_transaction(UserID::new(1));

        assert_eq!(
            transaction.check_owner(UserID::new(2)),
            Err(Error::Forbidden)
        );
    }
}
