use super::credentials::extract_bearer;
use super::permissions::check_permission;
use super::{AuthError, Claims, Permission, TokenVerifier};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use log::{debug, warn};
use std::sync::Arc;

/// Middleware state for one protected operation
#[derive(Clone)]
pub struct Guard {
    verifier: Arc<TokenVerifier>,
    permission: Permission,
}

impl Guard {
    pub fn new(verifier: Arc<TokenVerifier>, permission: Permission) -> Self {
        Self {
            verifier,
            permission,
        }
    }

    /// Run the full chain against the request headers
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = extract_bearer(headers)?;
        let claims = self.verifier.verify(token).await?;
        check_permission(self.permission, &claims)?;
        Ok(claims)
    }
}

/// Runs the wrapped handler only when the request carries a valid token
/// granting the guard's permission. The verified [`Claims`] are placed in the
/// request extensions.
pub async fn require_permission(
    State(guard): State<Guard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = match guard.authorize(request.headers()).await {
        Ok(claims) => claims,
        Err(err) => {
            warn!(
                "Rejected {} {} requiring '{}': {}",
                request.method(),
                request.uri().path(),
                guard.permission,
                err
            );
            return Err(err);
        }
    };

    debug!(
        "Authorized '{}' for {} {}",
        claims.sub.as_deref().unwrap_or("unknown"),
        request.method(),
        request.uri().path()
    );
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
