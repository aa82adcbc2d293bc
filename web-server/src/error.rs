use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use saved_links_core::{CoreError, ErrorEnvelope, ErrorExt, RedditApiError};
use tracing::warn;

/// Handler error; renders as an [`ErrorEnvelope`] body.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    /// A path parameter that is not a plain subreddit or sort name.
    InvalidPath { segment: String },
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self::Core(error)
    }
}

impl ApiError {
    /// Upstream failures keep their status code; a bad upstream body or a
    /// transport failure is a 502; anything else is a 500.
    pub fn envelope(&self) -> ErrorEnvelope {
        let error = match self {
            ApiError::Core(error) => error,
            ApiError::InvalidPath { segment } => {
                return ErrorEnvelope::new(
                    format!("Not a subreddit path: '{}'", segment),
                    StatusCode::NOT_FOUND.as_u16(),
                );
            }
        };
        if let Some(status_code) = error.upstream_status() {
            return ErrorEnvelope::fetch_failed(status_code);
        }
        match error {
            CoreError::RedditApi(RedditApiError::InvalidResponse { .. })
            | CoreError::Network(_)
            | CoreError::Serialization(_) => {
                ErrorEnvelope::new(error.to_string(), StatusCode::BAD_GATEWAY.as_u16())
            }
            _ => ErrorEnvelope::new(
                error.user_friendly_message(),
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Core(error) => {
                error.log_error();
            }
            ApiError::InvalidPath { segment } => {
                warn!("Rejected subreddit path segment '{}'", segment);
            }
        }
        let envelope = self.envelope();
        let status = StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_kept() {
        let error = ApiError::Core(CoreError::RedditApi(RedditApiError::UnexpectedStatus {
            status_code: 429,
            endpoint: "best".to_string(),
        }));
        assert_eq!(error.envelope(), ErrorEnvelope::fetch_failed(429));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_invalid_response_is_bad_gateway() {
        let error = ApiError::Core(CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: "post: missing field `title`".to_string(),
        }));
        let envelope = error.envelope();
        assert_eq!(envelope.status_code, 502);
        assert!(envelope.error.contains("title"));
    }

    #[test]
    fn test_other_errors_are_internal() {
        let error = ApiError::Core(CoreError::InvalidInput {
            message: "bad header".to_string(),
        });
        assert_eq!(error.envelope().status_code, 500);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_path_is_not_found() {
        let error = ApiError::InvalidPath {
            segment: "../api".to_string(),
        };
        assert_eq!(error.envelope().status_code, 404);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
