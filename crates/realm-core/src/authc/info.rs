use crate::principal::PrincipalCollection;
use secrecy::SecretString;

/// The outcome of a successful authentication.
///
/// Carries the principals that identify the subject and the credentials that were submitted, so
/// that credential matchers further down the line can still compare them.
#[derive(Debug)]
pub struct AuthenticationInfo {
    principals: PrincipalCollection,
    credentials: SecretString,
}

impl AuthenticationInfo {
    /// Creates a new `AuthenticationInfo`.
    pub fn new(principals: PrincipalCollection, credentials: SecretString) -> Self {
        AuthenticationInfo { principals, credentials }
    }

    /// The principals identifying the authenticated subject.
    pub fn principals(&self) -> &PrincipalCollection {
        &self.principals
    }

    /// The credentials submitted for this authentication.
    pub fn credentials(&self) -> &SecretString {
        &self.credentials
    }

    /// Gives up the principals, dropping the credentials.
    pub fn into_principals(self) -> PrincipalCollection {
        self.principals
    }
}
