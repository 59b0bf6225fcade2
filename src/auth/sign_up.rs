//! The sign-up page and the handler for its form.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{
        SignUpRequest, TokenPair,
        cookie::set_auth_cookies,
        password::{MIN_PASSWORD_LENGTH, PasswordStrength},
        service::{FieldErrors, UserState, sign_up},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, LINK_STYLE, auth_card, base, loading_spinner,
        text_input,
    },
};

const CREATE_CHAMA: &str = "create";
const JOIN_CHAMA: &str = "join";

/// The data entered by the user in the sign-up form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Either "join" or "create".
    pub chama: String,
    pub chama_name: String,
    pub chama_type: String,
    /// A checkbox, so any value means the terms were accepted.
    pub terms: Option<String>,
}

impl SignUpForm {
    /// The first problem that stops the form from being submitted, if any.
    fn check(&self) -> Option<String> {
        if self.first_name.trim().is_empty() {
            return Some("First name is required.".to_owned());
        }

        if self.phone.trim().is_empty() {
            return Some("Phone is required.".to_owned());
        }

        if !PasswordStrength::new(&self.password).is_acceptable() {
            return Some(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters and include at least \
                {} of: length, an upper-case letter, a digit, a symbol.",
                PasswordStrength::REQUIRED_SCORE
            ));
        }

        if self.password != self.confirm_password {
            return Some("Passwords do not match.".to_owned());
        }

        if self.terms.is_none() {
            return Some("You must accept the Terms and Privacy Policy.".to_owned());
        }

        None
    }

    fn to_request(&self) -> SignUpRequest {
        let create_chama = self.chama == CREATE_CHAMA;

        SignUpRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            create_chama,
            chama_name: if create_chama {
                self.chama_name.clone()
            } else {
                String::new()
            },
            chama_type: if create_chama {
                self.chama_type.clone()
            } else {
                String::new()
            },
        }
    }
}

/// Flatten field errors into one line per field, e.g. "email: Enter a valid email address.".
fn format_field_errors(errors: &FieldErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect()
}

fn sign_up_form(form: &SignUpForm, error_messages: &[String]) -> Markup {
    let creating_chama = form.chama == CREATE_CHAMA;

    html! {
        form
            hx-post=(endpoints::SIGN_UP_FORM)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if !error_messages.is_empty() {
                div id="form-errors" class="text-red-500 text-base"
                {
                    @for message in error_messages {
                        p { (message) }
                    }
                }
            }

            div class="grid gap-4 md:grid-cols-2"
            {
                (text_input("first_name", "First name", "text", &form.first_name, true, None))
                (text_input("last_name", "Last name", "text", &form.last_name, false, None))
                (text_input("phone", "Phone", "tel", &form.phone, true, None))
                (text_input("email", "Email (optional)", "email", &form.email, false, None))
                (text_input("password", "Password", "password", "", true, None))
                (text_input("confirm_password", "Confirm Password", "password", "", true, None))
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Chama" }

                div class="flex items-center gap-x-3"
                {
                    input type="radio" id="join" name="chama" value=(JOIN_CHAMA) checked[!creating_chama];
                    label for="join" class="text-sm" { "Join an existing Chama" }
                }

                div class="flex items-center gap-x-3"
                {
                    input type="radio" id="create" name="chama" value=(CREATE_CHAMA) checked[creating_chama];
                    label for="create" class="text-sm" { "Create a new Chama" }
                }

                (text_input("chama_name", "Chama name", "text", &form.chama_name, false, None))
                (text_input("chama_type", "Chama type (e.g., Savings Group)", "text", &form.chama_type, false, None))
            }

            div class="flex items-center gap-x-3"
            {
                input type="checkbox" id="terms" name="terms" class="rounded-xs" checked[form.terms.is_some()];
                label for="terms" class="text-sm text-gray-900 dark:text-white"
                {
                    "I agree to the Terms and Privacy Policy"
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Create account"
            }

            span class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                a href=(endpoints::SIGN_IN_VIEW) class=(LINK_STYLE) { "Sign in" }
            }
        }
    }
}

/// Display the sign-up page.
pub async fn get_sign_up_page() -> Response {
    let content = auth_card(
        "Create your account",
        "Join your chama or create a new one.",
        &sign_up_form(&SignUpForm::default(), &[]),
    );

    base("Sign Up", &[], &content).into_response()
}

/// Handler for the sign-up form.
///
/// A successful sign-up that signs the user in sets the token cookies and
/// redirects to the dashboard, otherwise the client is sent to sign in.
pub async fn post_sign_up(
    State(state): State<UserState>,
    jar: PrivateCookieJar,
    Form(form): Form<SignUpForm>,
) -> Response {
    if let Some(message) = form.check() {
        return sign_up_form(&form, &[message]).into_response();
    }

    let response = match sign_up(&state, &form.to_request()) {
        Ok(response) => response,
        Err(Error::InvalidSignUp(errors)) => {
            return sign_up_form(&form, &format_field_errors(&errors)).into_response();
        }
        Err(Error::DuplicateUsername) => {
            let message = "username: A user with this email or phone already exists".to_owned();
            return sign_up_form(&form, &[message]).into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while signing up: {error}");
            let message = "An internal error occurred. Please try again later.".to_owned();
            return sign_up_form(&form, &[message]).into_response();
        }
    };

    match (response.access, response.refresh) {
        (Some(access), Some(refresh)) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            set_auth_cookies(jar, &TokenPair { access, refresh }, state.secure_cookies),
        )
            .into_response(),
        _ => (HxRedirect(endpoints::SIGN_IN_VIEW.to_owned()), StatusCode::OK).into_response(),
    }
}
