//! Error types for the transactions client and controller

use thiserror::Error;

/// Failure talking to the transactions API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid base url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure of a controller operation; local state is left untouched
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("dashboard was closed before the response arrived")]
    Deactivated,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_display() {
        let err = ApiError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "unexpected status 500: boom");

        let wrapped = ControllerError::from(err);
        assert_eq!(wrapped.to_string(), "unexpected status 500: boom");
    }
}
