//! Authentication middleware that checks the access token cookie and redirects to the sign-in page.

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::{HxRedirect, HxRequest};

use crate::{
    AppState,
    auth::{JwtKeys, cookie::get_access_claims},
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    pub jwt_keys: JwtKeys,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            jwt_keys: state.jwt_keys.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a valid access token cookie.
///
/// The token's [Claims](crate::auth::Claims) are placed into the request
/// extensions and the request executed normally if the token is valid.
/// Otherwise the client is sent to the sign-in page, with an HTMX redirect
/// for HTMX requests.
///
/// **Note**: The app state must contain an `axum_extra::extract::cookie::Key` for decrypting and verifying the cookie contents.
pub async fn auth_guard(
    State(state): State<AuthState>,
    HxRequest(is_htmx_request): HxRequest,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match get_access_claims(&jar, &state.jwt_keys) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(_) if is_htmx_request => {
            (HxRedirect(endpoints::SIGN_IN_VIEW.to_owned()), StatusCode::OK).into_response()
        }
        Err(_) => Redirect::to(endpoints::SIGN_IN_VIEW).into_response(),
    }
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Router,
        extract::State,
        middleware,
        response::{Html, IntoResponse, Response},
        routing::get,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use axum_test::TestServer;

    use crate::{
        auth::{
            JwtKeys, PasswordHash, User,
            cookie::{COOKIE_ACCESS_TOKEN, set_auth_cookies},
            issue_token_pair,
        },
        endpoints,
    };

    use super::{AuthState, auth_guard};

    const TEST_SIGN_IN_ROUTE: &str = "/sign_in_for_test";
    const PROTECTED_ROUTE: &str = "/protected";

    fn auth_state() -> AuthState {
        AuthState {
            cookie_key: Key::generate(),
            jwt_keys: JwtKeys::new("foobar"),
        }
    }

    async fn test_sign_in_route(
        State(state): State<AuthState>,
        jar: PrivateCookieJar,
    ) -> Response {
        let user = User {
            id: 1,
            username: "0711111111".to_owned(),
            first_name: "John".to_owned(),
            last_name: "Kamau".to_owned(),
            email: String::new(),
            phone: "0711111111".to_owned(),
            chama_name: String::new(),
            chama_type: String::new(),
            password_hash: PasswordHash::new_unchecked("hash"),
        };
        let tokens = issue_token_pair(&user, &state.jwt_keys).unwrap();

        set_auth_cookies(jar, &tokens, false).into_response()
    }

    async fn test_handler() -> Html<&'static str> {
        Html("<h1>Hello, World!</h1>")
    }

    fn server() -> TestServer {
        let state = auth_state();
        let app = Router::new()
            .route(PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .route(TEST_SIGN_IN_ROUTE, get(test_sign_in_route))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn redirects_without_cookie() {
        let server = server();

        let response = server.get(PROTECTED_ROUTE).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::SIGN_IN_VIEW);
    }

    #[tokio::test]
    async fn htmx_request_gets_hx_redirect() {
        let server = server();

        let response = server
            .get(PROTECTED_ROUTE)
            .add_header("hx-request", "true")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::SIGN_IN_VIEW);
    }

    #[tokio::test]
    async fn allows_request_with_valid_cookie() {
        let server = server();
        let access_cookie = server.get(TEST_SIGN_IN_ROUTE).await.cookie(COOKIE_ACCESS_TOKEN);

        let response = server.get(PROTECTED_ROUTE).add_cookie(access_cookie).await;

        response.assert_status_ok();
        response.assert_text("<h1>Hello, World!</h1>");
    }
}
