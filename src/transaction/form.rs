//! The shared form fields for creating and editing transactions.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::{Category, CategoryId},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// Render the date, category, amount and description fields.
///
/// `selected_category` preselects the matching dropdown option when
/// editing an existing transaction.
pub(super) fn transaction_form_fields(
    default_date: Date,
    amount: Option<f64>,
    description: &str,
    selected_category: Option<CategoryId>,
    available_categories: &[Category],
) -> Markup {
    let amount_str = amount.map(|amount| format!("{:.2}", amount.abs()));

    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(default_date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category_id"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category_id"
                id="category_id"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @if selected_category.is_none() {
                    option value="" disabled selected { "Select a category" }
                }

                @for category in available_categories {
                    @if Some(category.id) == selected_category {
                        option value=(category.id) selected {
                            (category.name) " (" (category.kind.display_name()) ")"
                        }
                    } @else {
                        option value=(category.id) {
                            (category.name) " (" (category.kind.display_name()) ")"
                        }
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description (Optional)"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                maxlength="255"
                value=(description)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
