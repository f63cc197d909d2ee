//! Category management for labelling transactions as income or expenses.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{NewCategoryQuery, create_category_endpoint, get_new_category_page};
pub use db::{
    create_category, create_category_table, get_categories_by_user, get_category,
    get_owned_category, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryKind, CategoryName};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;

pub(crate) use domain::CategoryFormData;
