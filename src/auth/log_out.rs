//! The log-out route, which invalidates the auth cookie.

use axum::response::Redirect;
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::invalidate_auth_cookie, endpoints};

/// Invalidate the auth cookie and send the client back to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    (
        invalidate_auth_cookie(jar),
        Redirect::to(endpoints::LOG_IN_VIEW),
    )
}
