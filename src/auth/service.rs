//! Account creation and credential checks shared by the JSON API and the HTML forms.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::extract::FromRef;
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{
        JwtKeys, NewUser, PasswordHash, TokenPair, UserId, UserStore, issue_token_pair,
        password::MIN_PASSWORD_LENGTH,
    },
};

/// Validation messages keyed by the name of the offending field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const REQUIRED_MESSAGE: &str = "This field is required.";
const NAME_MAX_LENGTH: usize = 150;
const PHONE_MAX_LENGTH: usize = 32;
const CHAMA_MAX_LENGTH: usize = 128;

/// The state needed to create accounts and issue tokens.
#[derive(Debug, Clone)]
pub struct UserState {
    pub users: Arc<Mutex<UserStore>>,
    pub jwt_keys: JwtKeys,
    /// Whether a successful sign-up also signs the new user in.
    pub issue_sign_up_tokens: bool,
    pub password_hash_cost: u32,
    /// Whether the token cookies are marked `Secure`.
    pub secure_cookies: bool,
}

impl FromRef<AppState> for UserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            jwt_keys: state.jwt_keys.clone(),
            issue_sign_up_tokens: state.issue_sign_up_tokens,
            password_hash_cost: state.password_hash_cost,
            secure_cookies: state.secure_cookies,
        }
    }
}

/// The details submitted to create an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub create_chama: bool,
    pub chama_name: String,
    pub chama_type: String,
}

impl SignUpRequest {
    /// The email if one was given, otherwise the phone number.
    pub fn username(&self) -> &str {
        let email = self.email.trim();

        if email.is_empty() {
            self.phone.trim()
        } else {
            email
        }
    }
}

/// The response to a successful sign-up.
///
/// The tokens are omitted when sign-up does not sign the user in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

fn check_length(errors: &mut FieldErrors, field: &str, value: &str, max_length: usize) {
    if value.chars().count() > max_length {
        errors
            .entry(field.to_owned())
            .or_default()
            .push(format!("Ensure this field has no more than {max_length} characters."));
    }
}

fn check_required(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors
            .entry(field.to_owned())
            .or_default()
            .push(REQUIRED_MESSAGE.to_owned());
    }
}

/// Check the sign-up rules that do not depend on the stored users.
///
/// Returns an empty map when the request is valid.
pub fn validate_sign_up(request: &SignUpRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_required(&mut errors, "first_name", &request.first_name);
    check_length(&mut errors, "first_name", &request.first_name, NAME_MAX_LENGTH);
    check_length(&mut errors, "last_name", &request.last_name, NAME_MAX_LENGTH);
    check_required(&mut errors, "phone", &request.phone);
    check_length(&mut errors, "phone", &request.phone, PHONE_MAX_LENGTH);
    check_length(&mut errors, "chama_name", &request.chama_name, CHAMA_MAX_LENGTH);
    check_length(&mut errors, "chama_type", &request.chama_type, CHAMA_MAX_LENGTH);

    let email = request.email.trim();
    if !email.is_empty() && !EmailAddress::is_valid(email) {
        errors
            .entry("email".to_owned())
            .or_default()
            .push("Enter a valid email address.".to_owned());
    }

    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors
            .entry("password".to_owned())
            .or_default()
            .push(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
    }

    errors
}

/// Create an account and, if enabled, sign the new user in.
///
/// # Errors
///
/// Returns:
/// - [Error::InvalidSignUp] if the request breaks a sign-up rule.
/// - [Error::DuplicateUsername] if the email or phone is already registered.
/// - [Error::HashingError] or [Error::TokenCreationError] for internal failures.
pub fn sign_up(state: &UserState, request: &SignUpRequest) -> Result<SignUpResponse, Error> {
    let errors = validate_sign_up(request);
    if !errors.is_empty() {
        return Err(Error::InvalidSignUp(errors));
    }

    let username = request.username().to_owned();

    if lock_users(state)?.get_by_username(&username).is_some() {
        return Err(Error::DuplicateUsername);
    }

    // Hash without holding the lock.
    let password_hash = PasswordHash::new(&request.password, state.password_hash_cost)?;

    let mut users = lock_users(state)?;
    // Another request may have taken the username while hashing.
    let user = users.insert(NewUser {
        username,
        first_name: request.first_name.trim().to_owned(),
        last_name: request.last_name.trim().to_owned(),
        email: request.email.trim().to_owned(),
        phone: request.phone.trim().to_owned(),
        chama_name: request.chama_name.clone(),
        chama_type: request.chama_type.clone(),
        password_hash,
    })?;

    tracing::info!("created account {} for {}", user.id, user.username);

    let tokens = if state.issue_sign_up_tokens {
        Some(issue_token_pair(user, &state.jwt_keys)?)
    } else {
        None
    };

    Ok(SignUpResponse {
        id: user.id,
        username: user.username.clone(),
        access: tokens.as_ref().map(|tokens| tokens.access.clone()),
        refresh: tokens.map(|tokens| tokens.refresh),
    })
}

/// Exchange a username and password for a token pair.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the username is unknown or the
/// password is wrong.
pub fn obtain_token_pair(
    state: &UserState,
    username: &str,
    password: &str,
) -> Result<TokenPair, Error> {
    let user = lock_users(state)?
        .get_by_username(username.trim())
        .cloned()
        .ok_or(Error::InvalidCredentials)?;

    let is_password_valid = user
        .password_hash
        .verify(password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_valid {
        return Err(Error::InvalidCredentials);
    }

    issue_token_pair(&user, &state.jwt_keys)
}

fn lock_users(state: &UserState) -> Result<MutexGuard<'_, UserStore>, Error> {
    state
        .users
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire user store lock: {error}"))
        .map_err(|_| Error::StoreLockError)
}

#[cfg(test)]
pub(crate) fn test_user_state(issue_sign_up_tokens: bool) -> UserState {
    UserState {
        users: Arc::new(Mutex::new(UserStore::new())),
        jwt_keys: JwtKeys::new("foobar"),
        issue_sign_up_tokens,
        password_hash_cost: 4,
        secure_cookies: false,
    }
}

#[cfg(test)]
pub(crate) fn valid_sign_up_request() -> SignUpRequest {
    SignUpRequest {
        first_name: "Grace".to_owned(),
        last_name: "Achieng".to_owned(),
        phone: "0744444444".to_owned(),
        email: "grace@example.com".to_owned(),
        password: "Harambee2025!".to_owned(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        auth::{JwtKeys, TokenType, decode_token},
    };

    use super::{
        SignUpRequest, obtain_token_pair, sign_up, test_user_state, valid_sign_up_request,
        validate_sign_up,
    };

    #[test]
    fn valid_request_has_no_errors() {
        assert!(validate_sign_up(&valid_sign_up_request()).is_empty());
    }

    #[test]
    fn reports_every_invalid_field() {
        let errors = validate_sign_up(&SignUpRequest {
            first_name: " ".to_owned(),
            email: "not-an-email".to_owned(),
            password: "short".to_owned(),
            ..Default::default()
        });

        assert_eq!(
            errors.keys().collect::<Vec<_>>(),
            vec!["email", "first_name", "password", "phone"]
        );
        assert_eq!(errors["password"], vec!["Password must be at least 8 characters"]);
    }

    #[test]
    fn rejects_long_names() {
        let errors = validate_sign_up(&SignUpRequest {
            last_name: "a".repeat(151),
            ..valid_sign_up_request()
        });

        assert_eq!(
            errors["last_name"],
            vec!["Ensure this field has no more than 150 characters."]
        );
    }

    #[test]
    fn username_falls_back_to_phone() {
        let request = SignUpRequest {
            email: String::new(),
            ..valid_sign_up_request()
        };

        assert_eq!(request.username(), "0744444444");
    }

    #[test]
    fn sign_up_issues_tokens_when_enabled() {
        let state = test_user_state(true);

        let response = sign_up(&state, &valid_sign_up_request()).unwrap();

        assert_eq!(response.id, 1);
        assert_eq!(response.username, "grace@example.com");
        let access = response.access.expect("no access token");
        let claims = decode_token(&access, TokenType::Access, &JwtKeys::new("foobar")).unwrap();
        assert_eq!(claims.user_id, 1);
        assert!(response.refresh.is_some());
    }

    #[test]
    fn sign_up_without_tokens() {
        let state = test_user_state(false);

        let response = sign_up(&state, &valid_sign_up_request()).unwrap();

        assert_eq!(response.access, None);
        assert_eq!(response.refresh, None);
    }

    #[test]
    fn sign_up_rejects_duplicate_username() {
        let state = test_user_state(false);
        sign_up(&state, &valid_sign_up_request()).unwrap();

        let result = sign_up(&state, &valid_sign_up_request());

        assert_eq!(result, Err(Error::DuplicateUsername));
    }

    #[test]
    fn concurrent_sign_ups_create_one_account() {
        let state = test_user_state(false);

        let results = std::thread::scope(|scope| {
            let handles = [state.clone(), state.clone()]
                .map(|state| scope.spawn(move || sign_up(&state, &valid_sign_up_request())));

            handles.map(|handle| handle.join().unwrap())
        });

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(results.contains(&Err(Error::DuplicateUsername)));
        assert_eq!(state.users.lock().unwrap().len(), 1);
    }

    #[test]
    fn token_pair_requires_matching_password() {
        let state = test_user_state(false);
        sign_up(&state, &valid_sign_up_request()).unwrap();

        assert!(obtain_token_pair(&state, "grace@example.com", "Harambee2025!").is_ok());
        assert_eq!(
            obtain_token_pair(&state, "grace@example.com", "wrong password"),
            Err(Error::InvalidCredentials)
        );
        assert_eq!(
            obtain_token_pair(&state, "nobody@example.com", "Harambee2025!"),
            Err(Error::InvalidCredentials)
        );
    }
}
