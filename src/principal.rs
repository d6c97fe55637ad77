use crate::platform::UnixUser;
use std::fmt;

/// The principal a [`PamRealm`](crate::PamRealm) issues for an authenticated user.
///
/// Displays as `name:uid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixUserPrincipal {
    user: UnixUser,
}

impl UnixUserPrincipal {
    /// Wraps the given user record.
    pub fn new(user: UnixUser) -> Self {
        UnixUserPrincipal { user }
    }

    /// The user record returned by the authentication service.
    pub fn user(&self) -> &UnixUser {
        &self.user
    }
}

impl fmt::Display for UnixUserPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user.name(), self.user.uid())
    }
}
