use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain_checker_core::error::{LookupError, INTERNAL_ERROR_MESSAGE};
use serde::{Deserialize, Serialize};

/// Failures surfaced by the HTTP API
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Not found.")]
    NotFound,

    #[error("Unexpected fault: {0}")]
    Internal(String),
}

/// JSON body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Lookup(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client; internal detail never leaves the process
    pub fn public_message(&self) -> String {
        match self {
            Self::Lookup(err) => err.public_message(),
            Self::InvalidQuery(_) | Self::NotFound => self.to_string(),
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
