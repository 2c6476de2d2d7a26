/// Message returned to callers for every upstream or unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Every way a domain lookup can fail
///
/// Client-input variants carry the message shown to the caller. Upstream
/// variants carry detail meant for logs only; see [`LookupError::public_message`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Domain name is required.")]
    MissingDomain,

    #[error("Search type is required.")]
    MissingViewMode,

    #[error("Invalid search type provided.")]
    InvalidViewMode(String),

    #[error("WHOIS provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("WHOIS provider returned malformed data: {0}")]
    UpstreamMalformed(String),
}

impl LookupError {
    /// Whether the failure was caused by the request parameters
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDomain | Self::MissingViewMode | Self::InvalidViewMode(_)
        )
    }

    /// HTTP status code for this failure
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        }
    }
}
