use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

/// Body returned by every failing request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always false
    pub success: bool,
    /// HTTP status code of the failure
    pub error: u16,
    /// Human readable description
    pub message: String,
}

impl ApiError {
    /// Create a new ApiError with a message and status code
    pub fn new<S: ToString>(message: S, status_code: StatusCode) -> Self {
        Self {
            message: message.to_string(),
            status_code,
        }
    }

    /// Create new Internal Server Error (500)
    ///
    /// The detail is logged but never returned to the caller.
    pub fn internal<S: ToString>(detail: S) -> Self {
        log::error!("Internal server error: {}", detail.to_string());
        Self::new("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Create new Bad Request Error (400) with a message
    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    /// Create new Not Found Error (404)
    pub fn not_found() -> Self {
        Self::new(
            "The requested resource has not been found",
            StatusCode::NOT_FOUND,
        )
    }

    /// Create new Method Not Allowed Error (405)
    pub fn method_not_allowed() -> Self {
        Self::new("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    }

    /// Create new Unprocessable Entity Error (422) with a message
    pub fn unprocessable<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::UNPROCESSABLE_ENTITY)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code;
        let body = json!({
            "success": false,
            "error": status_code.as_u16(),
            "message": self.message,
        });
        (status_code, Json(body)).into_response()
    }
}
