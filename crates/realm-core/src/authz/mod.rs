//! Contains the role based authorization types returned by a [`Realm`].
//!
//! [`Realm`]: crate::realm::Realm

mod roles;
pub use roles::RoleSet;

use thiserror::Error;

/// The authorization data a realm holds for a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationInfo {
    roles: RoleSet,
}

impl AuthorizationInfo {
    /// Creates authorization info granting the given roles.
    pub fn new(roles: RoleSet) -> Self {
        AuthorizationInfo { roles }
    }

    /// The granted roles.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Gives up the granted roles.
    pub fn into_roles(self) -> RoleSet {
        self.roles
    }
}

/// The error returned when a role check fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The subject lacks the role that was required.
    #[error("subject does not have role [{role}]")]
    MissingRole {
        /// The role that was checked for.
        role: String,
    },
}
