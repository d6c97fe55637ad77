//! Authenticates a user against a PAM service and prints the user's roles.
//!
//! ```sh
//! cargo run --example pam -- login alice
//! ```
//!
//! The password is read from the `PAM_REALM_PASSWORD` environment variable.

use pam_realm::PamRealm;
use realm_core::Realm;
use std::env;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let (Some(service), Some(username)) = (args.next(), args.next()) else {
        error!("usage: pam <service> <username>");
        std::process::exit(2);
    };
    let password = env::var("PAM_REALM_PASSWORD")?;

    let realm = PamRealm::new().with_service(service);
    realm.init()?;

    let info = realm.authenticate((username.as_str(), password.as_str()).into()).await?;
    let authz = realm.authorization_info(info.principals()).await;
    info!(principals = %info.principals(), roles = %authz.roles(), "authenticated");
    Ok(())
}
