//! JSON web tokens for the API and the auth cookies.

use std::fmt::Debug;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{User, UserId},
};

/// How long an access token is valid for.
pub const ACCESS_TOKEN_LIFETIME: Duration = Duration::minutes(5);
/// How long a refresh token is valid for.
pub const REFRESH_TOKEN_LIFETIME: Duration = Duration::days(1);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    fn lifetime(self) -> Duration {
        match self {
            TokenType::Access => ACCESS_TOKEN_LIFETIME,
            TokenType::Refresh => REFRESH_TOKEN_LIFETIME,
        }
    }
}

/// The contents of a JSON web token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    pub user_id: UserId,
    pub username: String,
    /// The time the token was issued as a Unix timestamp.
    pub iat: i64,
    /// The expiry time of the token as a Unix timestamp.
    pub exp: i64,
    pub token_type: TokenType,
}

/// The keys for signing and verifying tokens with HS256.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

/// An access token and the refresh token issued with it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Sign a token of `token_type` for `user` that was issued at `now`.
///
/// # Errors
///
/// Returns [Error::TokenCreationError] if the token could not be signed.
pub fn encode_token(
    user: &User,
    token_type: TokenType,
    now: OffsetDateTime,
    keys: &JwtKeys,
) -> Result<String, Error> {
    let claims = Claims {
        user_id: user.id,
        username: user.username.clone(),
        iat: now.unix_timestamp(),
        exp: (now + token_type.lifetime()).unix_timestamp(),
        token_type,
    };

    encode(&Header::default(), &claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreationError(error.to_string()))
}

/// Issue a fresh access and refresh token for `user`.
///
/// # Errors
///
/// Returns [Error::TokenCreationError] if either token could not be signed.
pub fn issue_token_pair(user: &User, keys: &JwtKeys) -> Result<TokenPair, Error> {
    let now = OffsetDateTime::now_utc();

    Ok(TokenPair {
        access: encode_token(user, TokenType::Access, now, keys)?,
        refresh: encode_token(user, TokenType::Refresh, now, keys)?,
    })
}

/// Verify `token` and check that it is a `expected_type` token.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the signature is wrong, the token has
/// expired or it is the wrong type of token.
pub fn decode_token(token: &str, expected_type: TokenType, keys: &JwtKeys) -> Result<Claims, Error> {
    let claims = decode::<Claims>(token, &keys.decoding_key, &Validation::default())
        .map_err(|error| {
            tracing::debug!("rejected token: {error}");
            Error::InvalidToken
        })?
        .claims;

    if claims.token_type != expected_type {
        return Err(Error::InvalidToken);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::{PasswordHash, User},
    };

    use super::{JwtKeys, TokenType, decode_token, encode_token, issue_token_pair};

    fn user() -> User {
        User {
            id: 7,
            username: "mary@example.com".to_owned(),
            first_name: "Mary".to_owned(),
            last_name: "Wanjiku".to_owned(),
            email: "mary@example.com".to_owned(),
            phone: "0722222222".to_owned(),
            chama_name: String::new(),
            chama_type: String::new(),
            password_hash: PasswordHash::new_unchecked("hash"),
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let keys = JwtKeys::new("foobar");

        let pair = issue_token_pair(&user(), &keys).unwrap();
        let claims = decode_token(&pair.access, TokenType::Access, &keys).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "mary@example.com");
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn refresh_token_lasts_one_day() {
        let keys = JwtKeys::new("foobar");

        let pair = issue_token_pair(&user(), &keys).unwrap();
        let claims = decode_token(&pair.refresh, TokenType::Refresh, &keys).unwrap();

        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let keys = JwtKeys::new("foobar");

        let pair = issue_token_pair(&user(), &keys).unwrap();

        assert_eq!(
            decode_token(&pair.refresh, TokenType::Access, &keys),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let pair = issue_token_pair(&user(), &JwtKeys::new("foobar")).unwrap();

        assert_eq!(
            decode_token(&pair.access, TokenType::Access, &JwtKeys::new("bazqux")),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn rejects_expired_token() {
        let keys = JwtKeys::new("foobar");
        let issued_at = OffsetDateTime::now_utc() - Duration::hours(1);

        let token = encode_token(&user(), TokenType::Access, issued_at, &keys).unwrap();

        assert_eq!(
            decode_token(&token, TokenType::Access, &keys),
            Err(Error::InvalidToken)
        );
    }
}
