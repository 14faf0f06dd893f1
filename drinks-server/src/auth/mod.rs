//! Bearer token authorization for protected routes
//!
//! A request passes through the chain below before a protected handler runs:
//! - [`credentials::extract_bearer`] pulls the token out of the `Authorization` header
//! - [`verifier::TokenVerifier`] checks the signature against the issuer's key set
//!   ([`jwks::KeySetCache`]) together with expiry, audience and issuer
//! - [`permissions::check_permission`] requires the route's scope in the claims
//!
//! [`middleware::require_permission`] composes the chain as an axum middleware.

pub mod credentials;
mod error;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

pub use error::AuthError;
pub use middleware::{require_permission, Guard};
pub use permissions::Permission;
pub use verifier::{Claims, TokenVerifier};
