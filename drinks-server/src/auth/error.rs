use crate::errors::ApiError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Every way the authorization chain can reject a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No Authorization header provided")]
    MissingCredential,
    #[error("Authorization header malformed")]
    MalformedCredential,
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Unknown signing key: {0}")]
    UnknownSigningKey(String),
    #[error("Token signature verification failed")]
    InvalidSignature,
    #[error("Expired token")]
    ExpiredToken,
    #[error("Incorrect claims. Please, check the audience and issuer. ({0})")]
    InvalidClaims(String),
    #[error("Permissions are not included in JWT")]
    PermissionsClaimMissing,
    #[error("Forbidden: you do not have the authorization to access the requested resource")]
    PermissionDenied(String),
    #[error("Key set unavailable: {0}")]
    KeySetUnavailable(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedCredential | Self::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
            Self::MissingCredential
            | Self::InvalidHeader(_)
            | Self::UnknownSigningKey(_)
            | Self::InvalidSignature
            | Self::ExpiredToken
            | Self::InvalidClaims(_) => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::KeySetUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::KeySetUnavailable(_) => ApiError::internal(err),
            other => ApiError::new(other.to_string(), other.status_code()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
