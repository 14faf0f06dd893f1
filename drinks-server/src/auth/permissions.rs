use super::{AuthError, Claims};
use std::fmt;

/// A permission scope a protected operation requires.
///
/// Scopes are compared against the lowercased `permissions` claim, so they
/// must be declared in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission(&'static str);

impl Permission {
    pub const fn new(scope: &'static str) -> Self {
        Self(scope)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const GET_DRINKS_DETAIL: Permission = Permission::new("get:drinks-detail");
pub const POST_DRINKS: Permission = Permission::new("post:drinks");
pub const PATCH_DRINKS: Permission = Permission::new("patch:drinks");
pub const DELETE_DRINKS: Permission = Permission::new("delete:drinks");

/// Check that the verified claims grant `required`
pub fn check_permission(required: Permission, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if granted.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(required.to_string()))
    }
}
