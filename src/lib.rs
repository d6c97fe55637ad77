#![cfg(target_family = "unix")]

//! [`Realm`] implementation that authenticates against [`PAM`].
//!
//! The realm forwards username/password pairs to a PAM service and maps the authenticated user's
//! Unix groups onto roles, one role per group name.
//!
//! ```no_run
//! use pam_realm::PamRealm;
//! use realm_core::Realm;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let mut realm = PamRealm::new();
//! realm.set_service("login");
//! realm.init()?;
//!
//! let info = realm.authenticate(("alice", "wonderland").into()).await?;
//! let roles = realm.authorization_info(info.principals()).await;
//! println!("alice is in {}", roles.roles());
//! # Ok(())
//! # }
//! ```
//!
//! [`Realm`]: realm_core::Realm
//! [`PAM`]: https://en.wikipedia.org/wiki/Pluggable_authentication_module

mod config;
pub use config::{ConfigError, PamRealmConfig};

pub mod platform;
pub use platform::{Pam, PlatformError, PlatformHandle, PlatformService, UnixUser};

mod principal;
pub use principal::UnixUserPrincipal;

mod realm;
pub use realm::{DEFAULT_REALM_NAME, PamRealm};
