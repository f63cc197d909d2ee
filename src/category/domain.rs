//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, auth::UserID};

/// Database identifier for a category.
pub type CategoryId = i64;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether transactions in a category add to or subtract from the user's balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Money coming in, e.g. 'Salary'.
    Income,
    /// Money going out, e.g. 'Groceries'.
    Expense,
}

impl CategoryKind {
    /// The kind as the lowercase string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    /// The kind with a leading capital for display, e.g. "Income".
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryKind::Income => "Income",
            CategoryKind::Expense => "Expense",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(Error::InvalidCategoryKind(other.to_string())),
        }
    }
}

impl Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A label for income or expense transactions, e.g. 'Groceries', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub kind: CategoryKind,
    pub user_id: UserID,
}

impl Category {
    /// Check that `user_id` owns this category.
    ///
    /// # Errors
    ///
    /// Returns an [Error::CategoryNotFound] when the owner differs, so a
    /// category belonging to another user is indistinguishable from one
    /// that does not exist.
    pub fn check_owner(&self, user_id: UserID) -> Result<(), Error> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(Error::CategoryNotFound)
        }
    }
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub kind: String,
}


#[cfg(test)]
mod category_kind_tests {
    use std::str::FromStr;

    use crate::Error;

    use super::CategoryKind;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(CategoryKind::from_str("income"), Ok(CategoryKind::Income));
        assert_eq!(CategoryKind::from_str("expense"), Ok(CategoryKind::Expense));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            CategoryKind::from_str("transfer"),
            Err(Error::InvalidCategoryKind("transfer".to_string()))
        );
    }
}

#[cfg(test)]
mod check_owner_tests {
    use crate::{Error, auth::UserID};

    use super::{Category, CategoryKind, CategoryName};

    fn test_category(user_id: UserID) -> Category {
        Category {
            id: 1,
            name: CategoryName::new_unchecked("Groceries"),
            kind: CategoryKind::Expense,
            user_id,
        }
    }

    #[test]
    fn owner_passes() {
        let category = test_category(UserID::new(1));

        assert_eq!(category.check_owner(UserID::new(1)), Ok(()));
    }

    #[test]
    fn other_user_sees_not_found() {
        let category = test_category(UserID::new(1));

        assert_eq!(
            category.check_owner(UserID::new(2)),
            Err(Error::CategoryNotFound)
        );
    }
}
