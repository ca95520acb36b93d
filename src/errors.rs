use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{what} is not configured")]
    NotConfigured {
        what: String,
        suggestion: String,
    },

    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("Upstream rate limit exceeded: {0}")]
    UpstreamRateLimit(String),

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Filesystem error: {0}")]
    FilesystemError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn label(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::NotConfigured { what, .. } => format!("{} not configured", what),
            AppError::UpstreamAuth(_) => "Authentication error".to_string(),
            AppError::UpstreamRateLimit(_) => "Rate limit exceeded".to_string(),
            AppError::UpstreamUnavailable(_) => "Upstream service unavailable".to_string(),
            AppError::SerializationError(_) => "Failed to generate presentation".to_string(),
            AppError::FilesystemError(_) => "File system error".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AppError::ValidationError(_) => None,
            AppError::NotConfigured { what, .. } => Some(format!(
                "Please add your {} to the .env file to use this endpoint.",
                what
            )),
            AppError::UpstreamAuth(msg)
            | AppError::UpstreamRateLimit(msg)
            | AppError::UpstreamUnavailable(msg)
            | AppError::SerializationError(msg)
            | AppError::FilesystemError(msg)
            | AppError::InternalError(msg) => Some(msg.clone()),
        }
    }

    fn suggestion(&self) -> Option<String> {
        let hint = match self {
            AppError::ValidationError(_) => return None,
            AppError::NotConfigured { suggestion, .. } => return Some(suggestion.clone()),
            AppError::UpstreamAuth(_) => {
                "Verify your API key is correct and has sufficient credits."
            }
            AppError::UpstreamRateLimit(_) => "Wait a few minutes before trying again.",
            AppError::UpstreamUnavailable(_) => "Please check your API keys and try again.",
            AppError::SerializationError(_) => {
                "Please try again or contact support if the issue persists."
            }
            AppError::FilesystemError(_) => "Check file permissions and try again.",
            AppError::InternalError(_) => {
                "Please try again or contact support if the issue persists."
            }
        };
        Some(hint.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.label(),
            details: err.details(),
            suggestion: err.suggestion(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotConfigured { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamAuth(_) => StatusCode::UNAUTHORIZED,
            AppError::UpstreamRateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::FilesystemError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FilesystemError(err.to_string())
    }
}
impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::SerializationError(format!("Package error: {}", err))
    }
}
impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::SerializationError(format!("XML formatting error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| err.to_string());
        AppError::ValidationError(message)
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamUnavailable(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure reported by an external collaborator, classified so callers can
/// decide between aborting and trying the next option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimit(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Classifies a provider error from its message text.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has_any(&["incorrect api key", "invalid_api_key", "invalid api key", "401", "unauthorized"]) {
            UpstreamError::Auth(message.to_string())
        } else if has_any(&["rate limit", "rate_limit", "429", "quota"]) {
            UpstreamError::RateLimit(message.to_string())
        } else if has_any(&["model_not_found", "does not exist", "404", "not found"]) {
            UpstreamError::NotFound(message.to_string())
        } else if has_any(&["timed out", "timeout"]) {
            UpstreamError::Timeout(message.to_string())
        } else {
            UpstreamError::Other(message.to_string())
        }
    }

    /// Classifies a non-success HTTP status returned by a collaborator.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {}: {}", status, body);
        match status {
            401 | 403 => UpstreamError::Auth(message),
            429 => UpstreamError::RateLimit(message),
            404 => UpstreamError::NotFound(message),
            408 | 504 => UpstreamError::Timeout(message),
            _ => UpstreamError::Other(message),
        }
    }

    /// Auth and rate-limit failures end the request; anything else may be retried elsewhere.
    pub fn is_fatal(&self) -> bool {
        matches!(self, UpstreamError::Auth(_) | UpstreamError::RateLimit(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::from_status(status.as_u16(), &err.to_string())
        } else {
            UpstreamError::Other(err.to_string())
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Auth(msg) => AppError::UpstreamAuth(msg),
            UpstreamError::RateLimit(msg) => AppError::UpstreamRateLimit(msg),
            other => AppError::UpstreamUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UpstreamAuth("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::UpstreamRateLimit("test".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::SerializationError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::UpstreamRateLimit("slow down".into());
        assert_eq!(err.to_string(), "Upstream rate limit exceeded: slow down");
    }

    #[test]
    fn test_validation_body_has_no_details() {
        let body = ErrorResponse::from(&AppError::ValidationError("Topic is required".into()));
        assert_eq!(body.error, "Topic is required");
        assert!(body.details.is_none());
        assert!(body.suggestion.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Topic is required" }));
    }

    #[test]
    fn test_not_configured_carries_suggestion() {
        let err = AppError::NotConfigured {
            what: "Cloudmersive API key".into(),
            suggestion: "Add CLOUDMERSIVE_API_KEY=your-key-here to your .env file".into(),
        };
        let body = ErrorResponse::from(&err);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Cloudmersive API key not configured");
        assert!(body.suggestion.unwrap().contains("CLOUDMERSIVE_API_KEY"));
    }

    #[test]
    fn test_upstream_classification() {
        assert!(matches!(
            UpstreamError::classify("Incorrect API key provided: sk-***"),
            UpstreamError::Auth(_)
        ));
        assert!(matches!(
            UpstreamError::classify("Rate limit reached for gpt-4"),
            UpstreamError::RateLimit(_)
        ));
        assert!(matches!(
            UpstreamError::classify("You exceeded your current quota"),
            UpstreamError::RateLimit(_)
        ));
        assert!(matches!(
            UpstreamError::classify("The model `gpt-4` does not exist"),
            UpstreamError::NotFound(_)
        ));
        assert!(matches!(
            UpstreamError::classify("connection reset by peer"),
            UpstreamError::Other(_)
        ));
    }

    #[test]
    fn test_upstream_from_status() {
        assert!(matches!(UpstreamError::from_status(401, "no"), UpstreamError::Auth(_)));
        assert!(matches!(UpstreamError::from_status(429, ""), UpstreamError::RateLimit(_)));
        assert!(matches!(UpstreamError::from_status(404, ""), UpstreamError::NotFound(_)));
        assert_eq!(
            UpstreamError::from_status(502, "bad gateway"),
            UpstreamError::Other("HTTP 502: bad gateway".to_string())
        );
    }

    #[test]
    fn test_upstream_error_statuses() {
        let auth: AppError = UpstreamError::Auth("bad key".into()).into();
        assert_eq!(auth.status_code(), StatusCode::UNAUTHORIZED);
        let limited: AppError = UpstreamError::RateLimit("slow".into()).into();
        assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        let other: AppError = UpstreamError::Timeout("60s".into()).into();
        assert_eq!(other.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_maps_to_filesystem() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::FilesystemError(_)));
    }
}
