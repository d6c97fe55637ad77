//! The seam between the realm and the host's authentication service.
//!
//! [`Pam`] is the production implementation. Other implementations can stand in for it, for
//! instance to test a realm without a configured PAM stack.

use std::fmt::Debug;
use thiserror::Error;

mod pam;
pub use pam::{Pam, PamHandle};

mod user;
pub use user::UnixUser;

/// Opens handles to a named service profile of the host's authentication service.
pub trait PlatformService: Debug + Send + Sync {
    /// The handle type returned by [`open`](PlatformService::open).
    type Handle: PlatformHandle;

    /// Opens a handle for the given service profile.
    ///
    /// Fails when the profile is unknown or the authentication service is unavailable.
    fn open(&self, service: &str) -> Result<Self::Handle, PlatformError>;
}

/// An open handle to the host's authentication service.
///
/// Dropping the handle releases it.
pub trait PlatformHandle {
    /// Verifies the password of `username` and returns the user's record.
    fn authenticate(&mut self, username: &str, password: &str) -> Result<UnixUser, PlatformError>;
}

/// Errors reported by a [`PlatformService`] or its handles.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The service name cannot name a PAM profile.
    #[error("invalid PAM service name '{0}'")]
    InvalidService(String),
    /// No profile with this name is configured on the host.
    #[error("PAM service '{0}' is not configured on this host")]
    UnknownService(String),
    /// PAM returned an error.
    #[error("PAM error: {0}")]
    Pam(#[from] pam_auth::PamError),
    /// The user database has no record for the user.
    #[error("no user record for '{0}'")]
    UnknownUser(String),
    /// Looking up the user or its groups failed.
    #[error("user database lookup failed: {0}")]
    Lookup(#[from] nix::Error),
    /// Any other failure of the authentication service.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}
