//! The JSON endpoints for exchanging credentials for tokens and creating accounts.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::auth::{
    SignUpRequest,
    service::{UserState, obtain_token_pair, sign_up},
};

/// The body of a token request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRequest {
    /// The email or phone number the account was registered with.
    pub username: String,
    pub password: String,
}

/// Exchange a username and password for an access and refresh token.
pub async fn token_endpoint(
    State(state): State<UserState>,
    Json(request): Json<TokenRequest>,
) -> Response {
    match obtain_token_pair(&state, &request.username, &request.password) {
        Ok(tokens) => Json(tokens).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Create an account from the JSON body.
///
/// Responds with `201 Created` and the new account, which includes a token
/// pair when sign-up signs the user in.
pub async fn sign_up_endpoint(
    State(state): State<UserState>,
    Json(request): Json<SignUpRequest>,
) -> Response {
    match sign_up(&state, &request) {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(error) => error.into_json_response(),
    }
}
