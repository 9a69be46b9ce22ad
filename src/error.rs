use std::fmt;

/// Custom error type for AWX operations
#[derive(Debug)]
pub enum AwxError {
    /// The remote endpoint could not be reached or returned an unusable body
    RemoteUnavailable(String),
    /// The API answered with a status outside the success range
    UnexpectedStatus { status: u16, body: String },
    /// An identifier lookup matched zero records
    NotFound { entity: &'static str, lookup: String },
    /// An identifier lookup expected to be unique matched more than one record
    AmbiguousResult { entity: &'static str, lookup: String },
    /// Caller-supplied input was rejected before any request was issued
    Validation(String),
}

impl fmt::Display for AwxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwxError::RemoteUnavailable(msg) => {
                write!(f, "remote endpoint unavailable: {}", msg)
            }
            AwxError::UnexpectedStatus { status, body } => {
                write!(f, "unexpected status {}: {}", status, body)
            }
            AwxError::NotFound { entity, lookup } => {
                write!(f, "no {} matched {}", entity, lookup)
            }
            AwxError::AmbiguousResult { entity, lookup } => {
                write!(f, "more than one {} matched {}", entity, lookup)
            }
            AwxError::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl std::error::Error for AwxError {}

impl From<reqwest::Error> for AwxError {
    fn from(err: reqwest::Error) -> Self {
        AwxError::RemoteUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for AwxError {
    fn from(err: serde_json::Error) -> Self {
        AwxError::RemoteUnavailable(format!("malformed response body: {}", err))
    }
}

/// Result type alias for AWX operations
pub type Result<T> = std::result::Result<T, AwxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_unavailable_display() {
        let err = AwxError::RemoteUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = AwxError::UnexpectedStatus {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("forbidden"));
    }

    #[test]
    fn test_not_found_display() {
        let err = AwxError::NotFound {
            entity: "host",
            lookup: "id 42".to_string(),
        };
        assert_eq!(err.to_string(), "no host matched id 42");
    }

    #[test]
    fn test_ambiguous_result_display() {
        let err = AwxError::AmbiguousResult {
            entity: "project",
            lookup: "id 7".to_string(),
        };
        assert!(err.to_string().contains("more than one project"));
    }

    #[test]
    fn test_validation_display() {
        let err = AwxError::Validation("unknown field 'nope'".to_string());
        assert!(err.to_string().contains("validation error"));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AwxError = json_err.into();
        match err {
            AwxError::RemoteUnavailable(msg) => assert!(msg.contains("malformed")),
            _ => panic!("Expected AwxError::RemoteUnavailable"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        // Verify AwxError is Send + Sync for async usage
        assert_send_sync::<AwxError>();
    }
}
