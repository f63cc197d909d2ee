//! The registration page for creating a new account.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use email_address::EmailAddress;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error, PasswordHash,
    auth::{create_user, set_auth_cookie},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, email_input, loading_spinner,
        log_in_register, password_input,
    },
    internal_server_error::render_internal_server_error,
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }

    }
}

struct RegistrationFormErrors<'a> {
    email: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

impl Default for RegistrationFormErrors<'_> {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            confirm_password: None,
        }
    }
}

fn registration_form(email: &str, errors: &RegistrationFormErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email, errors.email))
            (password_input("", PASSWORD_INPUT_MIN_LENGTH, errors.password))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password))

            button
                type="submit" id="submit-button" tabindex="0"
                class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", &RegistrationFormErrors::default());
    let content = log_in_register("Create your account", &registration_form);
    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for creating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn registration_error(email: &str, errors: RegistrationFormErrors, status: StatusCode) -> Response {
    (status, registration_form(email, &errors)).into_response()
}

/// Handler for registration requests via the POST method.
///
/// On success, the new user is logged in straight away and redirected to
/// the ledger page.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let email = match EmailAddress::from_str(user_data.email.trim()) {
        Ok(email) => email,
        Err(_) => {
            return registration_error(
                &user_data.email,
                RegistrationFormErrors {
                    email: Some("Enter a valid email address."),
                    ..Default::default()
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    if user_data.password != user_data.confirm_password {
        return registration_error(
            &user_data.email,
            RegistrationFormErrors {
                confirm_password: Some("Passwords do not match."),
                ..Default::default()
            },
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    let password_hash =
        match PasswordHash::from_raw_password(&user_data.password, PasswordHash::DEFAULT_COST) {
            Ok(password_hash) => password_hash,
            Err(Error::TooWeak(feedback)) => {
                return registration_error(
                    &user_data.email,
                    RegistrationFormErrors {
                        password: Some(&format!("Password is too weak: {feedback}")),
                        ..Default::default()
                    },
                    StatusCode::UNPROCESSABLE_ENTITY,
                );
            }
            Err(error) => {
                tracing::error!("Could not hash password: {error}");
                return render_internal_server_error(Default::default());
            }
        };

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match create_user(email, password_hash, &connection) {
            Ok(user) => user,
            Err(Error::DuplicateEmail) => {
                return registration_error(
                    &user_data.email,
                    RegistrationFormErrors {
                        email: Some("That email is already registered. Log in instead."),
                        ..Default::default()
                    },
                    StatusCode::UNPROCESSABLE_ENTITY,
                );
            }
            Err(error) => {
                tracing::error!("Could not create user: {error}");
                return render_internal_server_error(Default::default());
            }
        }
    };

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting auth cookie: {error}");
            render_internal_server_error(Default::default())
        }
    }
}
