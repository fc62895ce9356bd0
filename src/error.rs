//! Error types for cloud API operations.

use thiserror::Error;

/// Errors that can occur while building, sending or binding API requests.
#[derive(Debug, Error)]
pub enum OtcError {
    /// Configuration is missing or incomplete.
    #[error("configuration required: {0}")]
    ConfigMissing(String),

    /// A filter name is not part of the resource's filter specification.
    #[error("unknown filter '{name}' for {resource}")]
    UnknownFilter {
        resource: &'static str,
        name: String,
    },

    /// A path template placeholder has no value.
    #[error("missing path parameter '{name}' for template '{template}'")]
    MissingPathParam {
        template: &'static str,
        name: String,
    },

    /// A path template is not well formed.
    #[error("invalid path template '{template}': {reason}")]
    InvalidTemplate {
        template: &'static str,
        reason: &'static str,
    },

    /// A field table failed startup validation.
    #[error("invalid schema {schema}: {reason}")]
    InvalidSchema {
        schema: &'static str,
        reason: String,
    },

    /// No resource with that kind is registered.
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    /// The resource does not offer the requested operation.
    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    /// API request failed with a non-success status.
    #[error("API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// A successful response did not have the expected shape.
    #[error("malformed {resource} response: {detail}")]
    MalformedResponse {
        resource: &'static str,
        detail: String,
    },

    /// A wire value could not be converted to its declared type.
    #[error("field '{field}': expected {expected}, found {found}")]
    Coercion {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl OtcError {
    /// HTTP status carried by a transport error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OtcError::ApiError { status_code, .. } => *status_code,
            OtcError::RateLimited { .. } => Some(429),
            OtcError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OtcError::UnknownFilter { .. }
                | OtcError::MissingPathParam { .. }
                | OtcError::InvalidTemplate { .. }
                | OtcError::InvalidSchema { .. }
                | OtcError::UnknownResource(_)
                | OtcError::Unsupported { .. }
                | OtcError::ConfigMissing(_)
        )
    }
}

/// Result type alias for API operations.
pub type Result<T> = core::result::Result<T, OtcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_of_api_error() {
        let err = OtcError::ApiError {
            message: "not found".to_string(),
            status_code: Some(404),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_unknown_filter_is_validation() {
        let err = OtcError::UnknownFilter {
            resource: "dcs.instance",
            name: "colour".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "unknown filter 'colour' for dcs.instance");
    }
}
