//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    alert::Alert, auth::FieldErrors, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The identifier and password do not match a registered user.
    #[error("no active account found with the given credentials")]
    InvalidCredentials,

    /// A user with the same username (email or phone) already exists.
    #[error("a user with this email or phone already exists")]
    DuplicateUsername,

    /// The sign-up details failed validation, keyed by field name.
    #[error("invalid sign-up details: {0:?}")]
    InvalidSignUp(FieldErrors),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A JSON web token could not be signed.
    #[error("could not create token: {0}")]
    TokenCreationError(String),

    /// A JSON web token was missing, expired, tampered with or of the wrong type.
    #[error("the token is invalid or has expired")]
    InvalidToken,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The action name does not match any of the acknowledged actions.
    #[error("unknown action \"{0}\"")]
    UnknownAction(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock for the in-memory store.
    #[error("could not acquire the store lock")]
    StoreLockError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UnknownAction(_) => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::UnknownAction(action) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Unknown action".to_owned(),
                    details: format!("There is no action called \"{action}\"."),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into the JSON body used by the auth API.
    ///
    /// Credential errors use a `{"detail": ...}` body, validation errors map
    /// each field to its messages.
    pub fn into_json_response(self) -> Response {
        match self {
            Error::InvalidCredentials | Error::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "No active account found with the given credentials" })),
            )
                .into_response(),
            Error::DuplicateUsername => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "username": ["A user with this email or phone already exists"] })),
            )
                .into_response(),
            Error::InvalidSignUp(field_errors) => {
                (StatusCode::BAD_REQUEST, Json(field_errors)).into_response()
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn lock_error_renders_500_page() {
        let response = Error::StoreLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn duplicate_username_is_a_field_error() {
        let response = Error::DuplicateUsername.into_json_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_credentials_are_unauthorized() {
        let response = Error::InvalidCredentials.into_json_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_action_alert_is_not_found() {
        let response = Error::UnknownAction("teleport".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
