use crate::config::PamRealmConfig;
use crate::platform::{Pam, PlatformError, PlatformHandle, PlatformService};
use crate::principal::UnixUserPrincipal;
use async_trait::async_trait;
use realm_core::authc::{AuthenticationError, AuthenticationInfo, UsernamePasswordToken};
use realm_core::authz::{AuthorizationInfo, RoleSet};
use realm_core::{ConfigurationError, PrincipalCollection, Realm};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, warn};

/// The name a [`PamRealm`] uses unless configured otherwise.
pub const DEFAULT_REALM_NAME: &str = "PamRealm";

/// [`Realm`] implementation that authenticates against [`PAM`].
///
/// The realm needs the name of a PAM service, which is the name of the file under `/etc/pam.d`
/// that configures how PAM verifies credentials for this application, e.g. `login` or `sshd`.
/// There is no default service.
///
/// Every call opens its own PAM transaction and ends it before returning, so the realm holds no
/// state besides its configuration and can be shared between tasks. The service must be set
/// before the realm is shared.
///
/// Roles are the names of the Unix groups of the authenticated user.
///
/// [`Realm`]: realm_core::Realm
/// [`PAM`]: https://en.wikipedia.org/wiki/Pluggable_authentication_module
#[derive(Debug)]
pub struct PamRealm<S = Pam> {
    name: String,
    service: Option<String>,
    platform: S,
}

impl PamRealm<Pam> {
    /// Creates an unconfigured realm backed by the host's PAM stack.
    pub fn new() -> Self {
        PamRealm::with_platform(Pam::new())
    }

    /// Creates a realm backed by the host's PAM stack from the given configuration.
    pub fn from_config(config: PamRealmConfig) -> Self {
        let mut realm = PamRealm::new();
        if let Some(name) = config.name {
            realm.name = name;
        }
        realm.service = config.service;
        realm
    }
}

impl Default for PamRealm<Pam> {
    fn default() -> Self {
        PamRealm::new()
    }
}

impl<S> PamRealm<S>
where
    S: PlatformService,
{
    /// Creates an unconfigured realm backed by the given authentication service.
    pub fn with_platform(platform: S) -> Self {
        PamRealm {
            name: DEFAULT_REALM_NAME.to_string(),
            service: None,
            platform,
        }
    }

    /// Sets the PAM service. Nothing is validated until [`init`](Realm::init).
    pub fn set_service<T: Into<String>>(&mut self, service: T) {
        self.service = Some(service.into());
    }

    /// Builder style variant of [`set_service`](PamRealm::set_service).
    pub fn with_service<T: Into<String>>(mut self, service: T) -> Self {
        self.set_service(service);
        self
    }

    /// Sets the name the realm tags its principals with.
    pub fn with_name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = name.into();
        self
    }

    /// The configured PAM service, if any.
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// The authentication service backing this realm.
    pub fn platform(&self) -> &S {
        &self.platform
    }

    fn configured_service(&self) -> Option<&str> {
        self.service.as_deref().filter(|s| !s.is_empty())
    }

    // The handle is dropped before returning, also when `f` fails or panics.
    fn with_handle<T, F>(&self, service: &str, f: F) -> Result<T, PlatformError>
    where
        F: FnOnce(&mut S::Handle) -> Result<T, PlatformError>,
    {
        let mut handle = self.platform.open(service)?;
        debug!(service, "opened PAM handle");
        let result = f(&mut handle);
        drop(handle);
        debug!(service, "released PAM handle");
        result
    }
}

#[async_trait]
impl<S> Realm for PamRealm<S>
where
    S: PlatformService,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing_attributes::instrument(skip(self))]
    fn init(&self) -> Result<(), ConfigurationError> {
        let service = self.configured_service().ok_or_else(|| ConfigurationError::MissingProperty {
            realm: self.name.clone(),
            property: "service",
        })?;
        // Only checks that the service can be reached.
        self.with_handle(service, |_| Ok(())).map_err(|e| {
            error!(realm = %self.name, service, error = %e, "PAM service unavailable");
            ConfigurationError::Initialization {
                realm: self.name.clone(),
                message: format!("could not open PAM service '{}'", service),
                source: Box::new(e),
            }
        })
    }

    #[tracing_attributes::instrument(skip(self, token))]
    async fn authenticate(&self, token: UsernamePasswordToken) -> Result<AuthenticationInfo, AuthenticationError> {
        if token.username().is_empty() {
            return Err(AuthenticationError::new("empty username"));
        }
        let service = self
            .configured_service()
            .ok_or_else(|| AuthenticationError::new(format!("realm '{}' has no PAM service configured", self.name)))?;

        let (username, password) = token.into_parts();
        let user = self
            .with_handle(service, |handle| handle.authenticate(&username, password.expose_secret()))
            .map_err(|e| {
                warn!(realm = %self.name, service, username = %username, error = %e, "PAM authentication failed");
                AuthenticationError::with_source("pam error", e)
            })?;

        let principal = UnixUserPrincipal::new(user);
        info!(realm = %self.name, principal = %principal, "PAM authentication succeeded");
        Ok(AuthenticationInfo::new(
            PrincipalCollection::from_principal(principal, self.name.clone()),
            password,
        ))
    }

    async fn authorization_info(&self, principals: &PrincipalCollection) -> AuthorizationInfo {
        let roles = match principals.one_by_type::<UnixUserPrincipal>() {
            Some(principal) => principal.user().groups().iter().cloned().collect(),
            None => RoleSet::new(),
        };
        AuthorizationInfo::new(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::UnixUser;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Counting {
        opened: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    struct CountingHandle {
        released: Arc<AtomicUsize>,
    }

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl PlatformHandle for CountingHandle {
        fn authenticate(&mut self, username: &str, password: &str) -> Result<UnixUser, PlatformError> {
            match password {
                "secret" => Ok(UnixUser::new(username, 1000, ["users", "wheel"])),
                _ => Err(PlatformError::Other("Authentication failure".into())),
            }
        }
    }

    impl PlatformService for Counting {
        type Handle = CountingHandle;

        fn open(&self, service: &str) -> Result<CountingHandle, PlatformError> {
            if service != "test" {
                return Err(PlatformError::UnknownService(service.to_string()));
            }
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(CountingHandle {
                released: self.released.clone(),
            })
        }
    }

    fn realm() -> PamRealm<Counting> {
        PamRealm::with_platform(Counting::default()).with_service("test")
    }

    #[test]
    fn from_config() {
        let realm = PamRealm::from_config(PamRealmConfig {
            name: Some("pamRealm".to_string()),
            service: Some("login".to_string()),
        });
        assert_eq!(realm.name(), "pamRealm");
        assert_eq!(realm.service(), Some("login"));
        assert_eq!(PamRealm::new().name(), DEFAULT_REALM_NAME);
    }

    #[test]
    fn empty_service_counts_as_unset() {
        let realm = PamRealm::with_platform(Counting::default()).with_service("");
        assert!(matches!(realm.init(), Err(ConfigurationError::MissingProperty { property: "service", .. })));
    }

    #[tokio::test]
    async fn handles_are_released_on_every_path() {
        let realm = realm();
        realm.init().unwrap();
        realm.authenticate(("alice", "secret").into()).await.unwrap();
        assert!(realm.authenticate(("alice", "wrong").into()).await.is_err());

        assert_eq!(realm.platform().opened.load(Ordering::SeqCst), 3);
        assert_eq!(realm.platform().released.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_username_never_reaches_the_platform() {
        let realm = realm();
        let err = realm.authenticate(("", "secret").into()).await.unwrap_err();

        assert_eq!(err.message(), "empty username");
        assert_eq!(realm.platform().opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn credentials_are_handed_back() {
        let info = realm().authenticate(("alice", "secret").into()).await.unwrap();

        assert_eq!(info.credentials().expose_secret(), "secret");
        assert_eq!(info.principals().realm_names(), vec![DEFAULT_REALM_NAME]);
        assert_eq!(
            info.principals().primary_principal().map(|p| p.to_string()),
            Some("alice:1000".to_string())
        );
    }
}
