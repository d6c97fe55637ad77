//! Contains the credential and authentication result types exchanged with a [`Realm`].
//!
//! [`Realm`]: crate::realm::Realm

mod error;
pub use error::AuthenticationError;

mod token;
pub use token::UsernamePasswordToken;

mod info;
pub use info::AuthenticationInfo;
