use secrecy::SecretString;
use std::fmt;

/// A username and password pair submitted for a single authentication attempt.
///
/// The password is kept in a [`SecretString`] so it is never printed by `Debug` and is zeroed when
/// dropped.
pub struct UsernamePasswordToken {
    username: String,
    password: SecretString,
}

impl UsernamePasswordToken {
    /// Creates a token for the given username and password.
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        UsernamePasswordToken {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The submitted username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The submitted password.
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Splits the token into its username and password.
    pub fn into_parts(self) -> (String, SecretString) {
        (self.username, self.password)
    }
}

impl fmt::Debug for UsernamePasswordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernamePasswordToken")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<(&str, &str)> for UsernamePasswordToken {
    fn from((username, password): (&str, &str)) -> Self {
        UsernamePasswordToken::new(username, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn debug_does_not_leak_password() {
        let token = UsernamePasswordToken::new("alice", "s3cr3t");
        let printed = format!("{:?}", token);

        assert!(printed.contains("alice"));
        assert_eq!(token.username(), "alice");
        assert_eq!(token.password().expose_secret(), "s3cr3t");
        assert!(!printed.contains("s3cr3t"));
    }

    #[test]
    fn into_parts() {
        let (username, password) = UsernamePasswordToken::from(("alice", "s3cr3t")).into_parts();
        assert_eq!(username, "alice");
        assert_eq!(password.expose_secret(), "s3cr3t");
    }
}
