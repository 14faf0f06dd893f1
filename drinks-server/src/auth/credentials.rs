use super::AuthError;
use http::header::AUTHORIZATION;
use http::HeaderMap;

/// Pull the bearer token out of the `Authorization` header.
///
/// The header must be exactly `<scheme> <token>` separated by a single space,
/// with the scheme matching `bearer` case-insensitively.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthError::MalformedCredential),
    }
}
