//! Core traits and types for realm backends.
//!
//! A [`Realm`](realm::Realm) is a single pluggable source of authentication and authorization
//! decisions. Backends implement it and hand out principals that the host keeps in a
//! [`PrincipalCollection`](principal::PrincipalCollection) between calls.

pub mod authc;
pub mod authz;
pub mod principal;
pub mod realm;

pub use principal::{Principal, PrincipalCollection};
pub use realm::{ConfigurationError, Realm};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
