//! Sign-out route handler that clears the token cookies and redirects users.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    auth::{UserState, cookie::invalidate_auth_cookies},
    endpoints,
};

/// Invalidate the token cookies and redirect the client to the sign-in page.
pub async fn get_sign_out(State(state): State<UserState>, jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookies(jar, state.secure_cookies);

    (jar, Redirect::to(endpoints::SIGN_IN_VIEW)).into_response()
}
