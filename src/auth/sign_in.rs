//! The sign-in page and the handler for its form.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use email_address::EmailAddress;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{
        cookie::set_auth_cookies,
        service::{UserState, obtain_token_pair},
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, auth_card, base, loading_spinner, text_input},
};

const MIN_PHONE_DIGITS: usize = 9;
const INVALID_INPUT_MESSAGE: &str = "Please provide valid credentials";
const INVALID_CREDENTIALS_MESSAGE: &str = "No active account found with the given credentials";
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

/// The data entered by the user in the sign-in form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    /// An email address or phone number.
    pub identifier: String,
    pub password: String,
}

impl SignInForm {
    fn is_valid(&self) -> bool {
        let identifier = self.identifier.trim();

        let is_identifier_valid = if identifier.contains('@') {
            EmailAddress::is_valid(identifier)
        } else {
            identifier.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
        };

        is_identifier_valid && !self.password.is_empty()
    }
}

fn sign_in_form(identifier: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::SIGN_IN_FORM)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(error_message) = error_message {
                p class="text-red-500 text-base" { (error_message) }
            }

            (text_input("identifier", "Phone or Email", "text", identifier, true, None))
            (text_input("password", "Password", "password", "", true, None))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Sign in"
            }

            span class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Don't have an account? "
                a href=(endpoints::SIGN_UP_VIEW) class=(LINK_STYLE) { "Sign up" }
            }
        }
    }
}

/// Display the sign-in page.
pub async fn get_sign_in_page() -> Response {
    let content = auth_card(
        "Sign in to Chama AI",
        "Smart. Simple. Secure.",
        &sign_in_form("", None),
    );

    base("Sign In", &[], &content).into_response()
}

/// Handler for the sign-in form.
///
/// On success the token cookies are set and the client is redirected to the
/// dashboard. Otherwise the form is returned with an error message.
pub async fn post_sign_in(
    State(state): State<UserState>,
    jar: PrivateCookieJar,
    Form(form): Form<SignInForm>,
) -> Response {
    if !form.is_valid() {
        return sign_in_form(&form.identifier, Some(INVALID_INPUT_MESSAGE)).into_response();
    }

    match obtain_token_pair(&state, &form.identifier, &form.password) {
        Ok(tokens) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            set_auth_cookies(jar, &tokens, state.secure_cookies),
        )
            .into_response(),
        Err(Error::InvalidCredentials) => {
            sign_in_form(&form.identifier, Some(INVALID_CREDENTIALS_MESSAGE)).into_response()
        }
        Err(error) => {
            tracing::error!("Unhandled error while signing in: {error}");
            sign_in_form(&form.identifier, Some(INTERNAL_ERROR_MESSAGE)).into_response()
        }
    }
}


#[cfg(test)]
mod sign_in_tests {
    use axum::{Router, routing::post};
    use axum_extra::extract::cookie::Key;
    use axum_test::TestServer;

    use crate::{
        auth::{
            cookie::{COOKIE_ACCESS_TOKEN, COOKIE_REFRESH_TOKEN},
            service::{UserState, sign_up, test_user_state, valid_sign_up_request},
        },
        endpoints,
        test_utils::{assert_form_error_message, must_get_form},
    };

    use super::{
        INVALID_CREDENTIALS_MESSAGE, INVALID_INPUT_MESSAGE, SignInForm, post_sign_in,
    };

    #[derive(Clone)]
    struct TestState {
        users: UserState,
        cookie_key: Key,
    }

    impl axum::extract::FromRef<TestState> for UserState {
        fn from_ref(state: &TestState) -> Self {
            state.users.clone()
        }
    }

    impl axum::extract::FromRef<TestState> for Key {
        fn from_ref(state: &TestState) -> Self {
            state.cookie_key.clone()
        }
    }

    fn server() -> TestServer {
        let users = test_user_state(false);
        sign_up(&users, &valid_sign_up_request()).expect("Could not create test user");

        let app = Router::new()
            .route(endpoints::SIGN_IN_FORM, post(post_sign_in))
            .with_state(TestState {
                users,
                cookie_key: Key::generate(),
            });

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[track_caller]
    fn assert_error(html: &str, want: &str) {
        let document = scraper::Html::parse_fragment(html);
        let form = must_get_form(&document);
        assert_form_error_message(&form, want);
    }

    #[tokio::test]
    async fn signs_in_with_email() {
        let server = server();

        let response = server
            .post(endpoints::SIGN_IN_FORM)
            .form(&SignInForm {
                identifier: "grace@example.com".to_owned(),
                password: "Harambee2025!".to_owned(),
            })
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::DASHBOARD_VIEW);
        assert!(!response.cookie(COOKIE_ACCESS_TOKEN).value().is_empty());
        assert!(!response.cookie(COOKIE_REFRESH_TOKEN).value().is_empty());
    }

    #[tokio::test]
    async fn rejects_short_phone_number() {
        let server = server();

        let response = server
            .post(endpoints::SIGN_IN_FORM)
            .form(&SignInForm {
                identifier: "07444".to_owned(),
                password: "Harambee2025!".to_owned(),
            })
            .await;

        response.assert_status_ok();
        assert_error(&response.text(), INVALID_INPUT_MESSAGE);
    }

    #[tokio::test]
    async fn rejects_empty_password() {
        let server = server();

        let response = server
            .post(endpoints::SIGN_IN_FORM)
            .form(&SignInForm {
                identifier: "0744444444".to_owned(),
                password: String::new(),
            })
            .await;

        assert_error(&response.text(), INVALID_INPUT_MESSAGE);
    }

    #[tokio::test]
    async fn wrong_password_shows_error() {
        let server = server();

        let response = server
            .post(endpoints::SIGN_IN_FORM)
            .form(&SignInForm {
                identifier: "grace@example.com".to_owned(),
                password: "wrong password".to_owned(),
            })
            .await;

        response.assert_status_ok();
        assert!(response.maybe_header("hx-redirect").is_none());
        assert_error(&response.text(), INVALID_CREDENTIALS_MESSAGE);
    }
}
