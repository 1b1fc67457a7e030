//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use super::types::AppError;
use crate::response::ApiResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ScheduleNotFound
            | Self::ClassNotFound
            | Self::AttendanceNotFound
            | Self::AppealNotFound
            | Self::LetterheadImageNotFound
            | Self::LetterheadScopeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::AppealAlreadyDecided => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            // 413 Payload Too Large
            Self::LetterheadImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 503 Service Unavailable (transient, client can retry)
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let mut body = ApiResponse::<serde_json::Value>::error(self.code.code_str(), self.message);
        if let Some(details) = self.details {
            body.data = serde_json::to_value(details).ok();
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::ScheduleNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::TokenExpired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ErrorCode::AppealAlreadyDecided.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::NotAttendable.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::LetterheadImageTooLarge.http_status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
