//! Alert fragments for displaying success and error messages to users.
//!
//! Endpoints triggered by htmx return these fragments, which the
//! response-targets extension swaps into the page's alert container.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

const SUCCESS_ALERT_STYLE: &str = "rounded border border-green-400 bg-green-100 \
    px-4 py-3 text-green-700 dark:border-green-700 dark:bg-green-900 dark:text-green-300";

const ERROR_ALERT_STYLE: &str = "rounded border border-red-400 bg-red-100 \
    px-4 py-3 text-red-700 dark:border-red-700 dark:bg-red-900 dark:text-red-300";

/// A dismissible message describing the outcome of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The operation succeeded.
    SuccessSimple {
        message: String,
    },
    /// The operation failed.
    Error {
        message: String,
        details: String,
    },
}

impl Alert {
    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_markup(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_ALERT_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_ALERT_STYLE, message, details),
        };

        html! {
            div class=(style) role="alert"
            {
                p class="font-semibold" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_markup().into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_renders_message_and_details() {
        let markup = Alert::error("Could not delete transaction", "Try again later.")
            .into_markup()
            .into_string();

        let html = Html::parse_fragment(&markup);
        let paragraphs: Vec<String> = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<Vec<_>>().join(""))
            .collect();

        assert_eq!(
            paragraphs,
            vec![
                "Could not delete transaction".to_owned(),
                "Try again later.".to_owned()
            ]
        );
    }

    #[test]
    fn simple_success_alert_has_no_details_paragraph() {
        let markup = Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_markup()
        .into_string();

        let html = Html::parse_fragment(&markup);
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(paragraphs.len(), 1, "want 1 paragraph, got {}", paragraphs.len());
    }
}
