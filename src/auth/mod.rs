//! User accounts, token auth and the sign-in/sign-up pages.

mod api;
pub(crate) mod cookie;
mod middleware;
pub(crate) mod password;
mod service;
mod sign_in;
mod sign_out;
mod sign_up;
pub(crate) mod token;
mod user;

pub use api::{TokenRequest, sign_up_endpoint, token_endpoint};
pub use middleware::{AuthState, auth_guard};
pub use password::{PasswordHash, PasswordStrength};
pub use service::{
    FieldErrors, SignUpRequest, SignUpResponse, UserState, obtain_token_pair, sign_up,
    validate_sign_up,
};
pub use sign_in::{SignInForm, get_sign_in_page, post_sign_in};
pub use sign_out::get_sign_out;
pub use sign_up::{SignUpForm, get_sign_up_page, post_sign_up};
pub use token::{Claims, JwtKeys, TokenPair, TokenType, decode_token, issue_token_pair};
pub use user::{NewUser, User, UserId, UserStore};
