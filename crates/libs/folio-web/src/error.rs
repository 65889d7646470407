//! Main Crate Error

use axum::{
    Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

/// Failures while resolving the request context from a bearer token.
///
/// Kept `Clone` so the resolver middleware can park the outcome in the
/// request extensions for the `Ctx` extractor to pick up.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CtxError {
    #[error(transparent)]
    Auth(#[from] folio_auth::error::Error),

    /// Token was valid but its subject no longer exists.
    #[error("Unknown user")]
    UnknownUser,

    /// Token was valid but the account is administratively disabled.
    #[error("Inactive user")]
    InactiveUser,

    /// The user store could not be reached; details are logged at the site.
    #[error("User store unavailable")]
    Store,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] folio_models::error::Error),

    #[error(transparent)]
    Auth(#[from] folio_auth::error::Error),

    #[error(transparent)]
    Ctx(#[from] CtxError),

    /* Api Errors */
    #[error("API Forbidden")]
    ApiForbidden,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Missing Credentials")]
    MissingCredentials,

    #[error("Context Missing")]
    CtxMissing,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Author {0} not found")]
    UnknownAuthor(uuid::Uuid),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, message) = match self {
            Error::WrongCredentials => (
                StatusCode::UNAUTHORIZED,
                "Incorrect username or password".to_string(),
            ),
            Error::MissingCredentials | Error::CtxMissing => {
                (StatusCode::UNAUTHORIZED, "Missing credentials".to_string())
            }
            Error::ApiForbidden => (StatusCode::FORBIDDEN, "Access forbidden".to_string()),
            Error::UsernameTaken => (
                StatusCode::BAD_REQUEST,
                "Username already registered".to_string(),
            ),
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Error::UnknownAuthor(id) => {
                (StatusCode::BAD_REQUEST, format!("Author {id} not found"))
            }
            Error::Ctx(err) => match err {
                CtxError::Auth(err) => return auth_error_response(err),
                CtxError::UnknownUser => (
                    StatusCode::UNAUTHORIZED,
                    "Could not validate credentials".to_string(),
                ),
                CtxError::InactiveUser => (StatusCode::BAD_REQUEST, "Inactive user".to_string()),
                CtxError::Store => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            Error::Auth(err) => return auth_error_response(err),
            Error::AuthTokenCreation | Error::Models(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        error_response(status, message)
    }
}

fn auth_error_response(err: folio_auth::error::Error) -> axum::response::Response {
    let (status, message) = match err {
        folio_auth::error::Error::InvalidToken => {
            (StatusCode::UNAUTHORIZED, "Invalid authentication token")
        }
        folio_auth::error::Error::TokenMissing => {
            (StatusCode::UNAUTHORIZED, "Authentication required")
        }
        folio_auth::error::Error::TokenExpired => {
            (StatusCode::UNAUTHORIZED, "Authentication token expired")
        }
        folio_auth::error::Error::TokenCreation(_) | folio_auth::error::Error::PasswordHash(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    };
    error_response(status, message.to_string())
}

/// Builds the JSON error body; 401 responses carry the bearer challenge.
fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    let body = Json(json!({
        "error": {
            "message": message,
            "status": status.as_u16()
        }
    }));
    let mut response = (status, body).into_response();
    if status == StatusCode::UNAUTHORIZED {
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            header::HeaderValue::from_static("Bearer"),
        );
    }
    response
}
