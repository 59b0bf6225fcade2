//! Stores the token pair in private cookies for the browser flow.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{
        Claims, JwtKeys, TokenPair, TokenType, decode_token,
        token::{ACCESS_TOKEN_LIFETIME, REFRESH_TOKEN_LIFETIME},
    },
};

pub(crate) const COOKIE_ACCESS_TOKEN: &str = "accessToken";
pub(crate) const COOKIE_REFRESH_TOKEN: &str = "refreshToken";

fn auth_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .build()
}

/// Add the access and refresh token cookies to `jar`.
///
/// Each cookie expires with its token. Set `secure` only when the app is
/// served over HTTPS. Browsers drop `Secure` cookies sent over plain HTTP.
pub(crate) fn set_auth_cookies(
    jar: PrivateCookieJar,
    tokens: &TokenPair,
    secure: bool,
) -> PrivateCookieJar {
    jar.add(auth_cookie(
        COOKIE_ACCESS_TOKEN,
        tokens.access.clone(),
        ACCESS_TOKEN_LIFETIME,
        secure,
    ))
    .add(auth_cookie(
        COOKIE_REFRESH_TOKEN,
        tokens.refresh.clone(),
        REFRESH_TOKEN_LIFETIME,
        secure,
    ))
}

/// Overwrite the auth cookies with expired ones, which deletes them on the client side.
pub(crate) fn invalidate_auth_cookies(jar: PrivateCookieJar, secure: bool) -> PrivateCookieJar {
    let expired = |name: &'static str| {
        let mut cookie = auth_cookie(name, "deleted".to_owned(), Duration::ZERO, secure);
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie
    };

    jar.add(expired(COOKIE_ACCESS_TOKEN))
        .add(expired(COOKIE_REFRESH_TOKEN))
}

/// The claims of the access token in `jar`.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if there is no access token cookie or the token is not valid.
pub(crate) fn get_access_claims(jar: &PrivateCookieJar, keys: &JwtKeys) -> Result<Claims, Error> {
    let cookie = jar.get(COOKIE_ACCESS_TOKEN).ok_or(Error::InvalidToken)?;

    decode_token(cookie.value(), TokenType::Access, keys)
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::{JwtKeys, PasswordHash, User, issue_token_pair},
    };

    use super::{
        COOKIE_ACCESS_TOKEN, COOKIE_REFRESH_TOKEN, get_access_claims, invalidate_auth_cookies,
        set_auth_cookies,
    };

    fn user() -> User {
        User {
            id: 3,
            username: "0733333333".to_owned(),
            first_name: "Peter".to_owned(),
            last_name: "Omondi".to_owned(),
            email: String::new(),
            phone: "0733333333".to_owned(),
            chama_name: String::new(),
            chama_type: String::new(),
            password_hash: PasswordHash::new_unchecked("hash"),
        }
    }

    #[test]
    fn set_cookies_holds_valid_access_token() {
        let keys = JwtKeys::new("foobar");
        let tokens = issue_token_pair(&user(), &keys).unwrap();

        let jar = set_auth_cookies(PrivateCookieJar::new(Key::generate()), &tokens, false);

        let claims = get_access_claims(&jar, &keys).unwrap();
        assert_eq!(claims.user_id, 3);

        let access = jar.get(COOKIE_ACCESS_TOKEN).unwrap();
        assert_eq!(access.max_age(), Some(Duration::minutes(5)));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(false));
        let refresh = jar.get(COOKIE_REFRESH_TOKEN).unwrap();
        assert_eq!(refresh.max_age(), Some(Duration::days(1)));
    }

    #[test]
    fn invalidated_cookies_are_expired() {
        let keys = JwtKeys::new("foobar");
        let tokens = issue_token_pair(&user(), &keys).unwrap();
        let jar = set_auth_cookies(PrivateCookieJar::new(Key::generate()), &tokens, false);

        let jar = invalidate_auth_cookies(jar, false);

        let access = jar.get(COOKIE_ACCESS_TOKEN).unwrap();
        assert_eq!(access.value(), "deleted");
        assert_eq!(access.max_age(), Some(Duration::ZERO));
        assert_eq!(
            access.expires_datetime(),
            Some(OffsetDateTime::UNIX_EPOCH)
        );
        assert_eq!(get_access_claims(&jar, &keys), Err(Error::InvalidToken));
    }

    #[test]
    fn secure_flag_marks_cookies_secure() {
        let keys = JwtKeys::new("foobar");
        let tokens = issue_token_pair(&user(), &keys).unwrap();

        let jar = set_auth_cookies(PrivateCookieJar::new(Key::generate()), &tokens, true);

        assert_eq!(jar.get(COOKIE_ACCESS_TOKEN).unwrap().secure(), Some(true));
        assert_eq!(jar.get(COOKIE_REFRESH_TOKEN).unwrap().secure(), Some(true));

        let jar = invalidate_auth_cookies(jar, true);

        assert_eq!(jar.get(COOKIE_ACCESS_TOKEN).unwrap().secure(), Some(true));
    }

    #[test]
    fn missing_cookie_is_invalid_token() {
        let jar = PrivateCookieJar::new(Key::generate());

        assert_eq!(
            get_access_claims(&jar, &JwtKeys::new("foobar")),
            Err(Error::InvalidToken)
        );
    }
}
