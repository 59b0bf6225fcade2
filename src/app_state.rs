//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{
    auth::{JwtKeys, PasswordHash, UserStore},
    store::ChamaStore,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The local timezone as a canonical timezone name, e.g. "Africa/Nairobi".
    pub local_timezone: String,

    /// The keys for signing and verifying access and refresh tokens.
    pub jwt_keys: JwtKeys,

    /// Whether sign-up responses include a token pair.
    pub issue_sign_up_tokens: bool,

    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,

    /// Whether the token cookies carry the `Secure` attribute, i.e. the app is
    /// reached over HTTPS.
    pub secure_cookies: bool,

    /// The contributions, loans, members and notifications of the chama.
    pub store: Arc<Mutex<ChamaStore>>,

    /// The registered users.
    pub users: Arc<Mutex<UserStore>>,
}

impl AppState {
    /// Create a new [AppState] seeded with the sample chama and no users.
    ///
    /// `secret` signs the tokens and derives the cookie key.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Africa/Nairobi".
    pub fn new(secret: &str, local_timezone: &str, issue_sign_up_tokens: bool) -> Self {
        Self {
            cookie_key: create_cookie_key(secret),
            local_timezone: local_timezone.to_owned(),
            jwt_keys: JwtKeys::new(secret),
            issue_sign_up_tokens,
            password_hash_cost: PasswordHash::DEFAULT_COST,
            secure_cookies: false,
            store: Arc::new(Mutex::new(ChamaStore::with_sample_data())),
            users: Arc::new(Mutex::new(UserStore::new())),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use super::{AppState, create_cookie_key};

    #[test]
    fn cookie_key_is_derived_from_secret() {
        assert_eq!(
            create_cookie_key("foobar").master(),
            create_cookie_key("foobar").master()
        );
        assert_ne!(
            create_cookie_key("foobar").master(),
            create_cookie_key("bazqux").master()
        );
    }

    #[test]
    fn new_state_has_sample_data_and_no_users() {
        let state = AppState::new("foobar", "Africa/Nairobi", true);

        assert_eq!(state.store.lock().unwrap().members.len(), 4);
        assert!(state.users.lock().unwrap().is_empty());
        assert!(state.issue_sign_up_tokens);
        assert!(!state.secure_cookies);
    }
}
