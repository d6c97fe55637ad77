//! The [`Realm`] trait and its lifecycle errors.

use crate::BoxError;
use crate::authc::{AuthenticationError, AuthenticationInfo, UsernamePasswordToken};
use crate::authz::{AuthorizationError, AuthorizationInfo};
use crate::principal::PrincipalCollection;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// A single pluggable source of authentication and authorization decisions.
///
/// Realms are built in two phases: construct and configure the realm, then call [`init`] once
/// before anything else. Calling [`authenticate`] or [`authorization_info`] on a realm that was
/// never initialized is a caller error; realms are free to fail such calls.
///
/// [`init`]: Realm::init
/// [`authenticate`]: Realm::authenticate
/// [`authorization_info`]: Realm::authorization_info
#[async_trait]
pub trait Realm: Send + Sync + Debug {
    /// The name this realm tags its principals with.
    fn name(&self) -> &str;

    /// Checks the realm's configuration and the reachability of its back-end.
    ///
    /// An error here is fatal: the realm cannot correct a bad configuration at runtime.
    fn init(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Tells whether this realm can process the given token.
    fn supports(&self, _token: &UsernamePasswordToken) -> bool {
        true
    }

    /// Verifies the credentials in `token`.
    async fn authenticate(&self, token: UsernamePasswordToken) -> Result<AuthenticationInfo, AuthenticationError>;

    /// Looks up the authorization data for the given principals.
    ///
    /// Principals this realm does not recognize yield empty authorization info rather than an
    /// error.
    async fn authorization_info(&self, principals: &PrincipalCollection) -> AuthorizationInfo;

    /// Returns `true` if the principals are granted `role`.
    async fn has_role(&self, principals: &PrincipalCollection, role: &str) -> bool {
        self.authorization_info(principals).await.roles().contains(role)
    }

    /// Returns `true` if the principals are granted every one of `roles`.
    async fn has_all_roles(&self, principals: &PrincipalCollection, roles: &[&str]) -> bool {
        self.authorization_info(principals).await.roles().contains_all(roles.iter().copied())
    }

    /// Fails with [`AuthorizationError::MissingRole`] unless the principals are granted `role`.
    async fn check_role(&self, principals: &PrincipalCollection, role: &str) -> Result<(), AuthorizationError> {
        if self.has_role(principals, role).await {
            Ok(())
        } else {
            Err(AuthorizationError::MissingRole { role: role.to_string() })
        }
    }
}

/// The fatal error returned by [`Realm::init`].
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A required configuration property was never set.
    #[error("realm '{realm}': required property '{property}' is not set")]
    MissingProperty {
        /// The name of the realm.
        realm: String,
        /// The name of the missing property.
        property: &'static str,
    },
    /// The realm's back-end could not be reached with the given configuration.
    #[error("realm '{realm}' failed to initialize: {message}")]
    Initialization {
        /// The name of the realm.
        realm: String,
        /// A short description of what failed.
        message: String,
        /// The underlying cause.
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::RoleSet;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct FixedRoles;

    #[async_trait]
    impl Realm for FixedRoles {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn authenticate(&self, token: UsernamePasswordToken) -> Result<AuthenticationInfo, AuthenticationError> {
            let (username, password) = token.into_parts();
            Ok(AuthenticationInfo::new(PrincipalCollection::from_principal(username, self.name()), password))
        }

        async fn authorization_info(&self, principals: &PrincipalCollection) -> AuthorizationInfo {
            match principals.one_by_type::<String>() {
                Some(_) => AuthorizationInfo::new(["admin", "users"].into_iter().collect::<RoleSet>()),
                None => AuthorizationInfo::default(),
            }
        }
    }

    #[tokio::test]
    async fn role_checks_use_authorization_info() {
        let realm = FixedRoles;
        let principals = realm.authenticate(("alice", "pw").into()).await.unwrap().into_principals();

        assert!(realm.init().is_ok());
        assert!(realm.supports(&("bob", "pw").into()));
        assert!(realm.has_role(&principals, "admin").await);
        assert!(realm.has_all_roles(&principals, &["admin", "users"]).await);
        assert!(!realm.has_all_roles(&principals, &["admin", "root"]).await);
        assert_eq!(realm.check_role(&principals, "admin").await, Ok(()));
        assert_eq!(
            realm.check_role(&principals, "root").await,
            Err(AuthorizationError::MissingRole { role: "root".to_string() })
        );
    }

    #[tokio::test]
    async fn unknown_principals_have_no_roles() {
        let realm = FixedRoles;
        assert!(!realm.has_role(&PrincipalCollection::new(), "admin").await);
    }
}
