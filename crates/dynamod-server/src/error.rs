//! HTTP mapping for request-path failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dynamod_core::models::ErrorBody;
use dynamod_core::ResolutionError;

/// A failure rendered as a status code plus JSON `ErrorBody`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::new("invalid_request", message),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::new("internal_error", message),
        }
    }
}

impl From<ResolutionError> for ApiError {
    fn from(err: ResolutionError) -> Self {
        // Upstream failures stay 500; clients do not distinguish 502/504.
        let status = match &err {
            ResolutionError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ResolutionError::UnknownModule { .. } => StatusCode::NOT_FOUND,
            ResolutionError::UpstreamUnavailable { .. } | ResolutionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &err {
            ResolutionError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        Self {
            status,
            body: ErrorBody::new(err.code(), message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamod_core::FetchError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ResolutionError::invalid_request("x"), StatusCode::BAD_REQUEST),
            (
                ResolutionError::UnknownModule {
                    feature: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ResolutionError::UpstreamUnavailable {
                    feature: "x".into(),
                    source: FetchError::ReadTimeout {
                        url: "https://host/x.apk".into(),
                    },
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ResolutionError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let code = err.code();
            let api: ApiError = err.into();
            assert_eq!(api.status, expected);
            assert_eq!(api.body.error, code);
            assert_eq!(api.body.status, "error");
        }
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        let api: ApiError = ResolutionError::Internal("secret detail".into()).into();
        assert_eq!(api.body.message, "Internal server error");
    }
}
