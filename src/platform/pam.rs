use super::{PlatformError, PlatformHandle, PlatformService, UnixUser};
use nix::unistd::{Gid, Group, User};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PAM_CONFIG_DIRS: [&str; 3] = ["/etc/pam.d", "/usr/lib/pam.d", "/usr/share/pam.d"];
const PAM_LEGACY_CONFIG: &str = "/etc/pam.conf";

/// [`PlatformService`] backed by Linux-PAM, with user and group records resolved through the
/// system's user database.
///
/// PAM itself falls back to the `other` profile when asked for a service it does not know, so
/// [`open`](PlatformService::open) first checks that a profile with the requested name exists in
/// one of the PAM configuration directories.
#[derive(Debug, Clone)]
pub struct Pam {
    config_dirs: Vec<PathBuf>,
    legacy_config: Option<PathBuf>,
}

impl Pam {
    /// Looks up service profiles in the standard PAM configuration locations.
    pub fn new() -> Self {
        Pam {
            config_dirs: PAM_CONFIG_DIRS.iter().map(PathBuf::from).collect(),
            legacy_config: Some(PathBuf::from(PAM_LEGACY_CONFIG)),
        }
    }

    /// Looks up service profiles in the given directories only.
    pub fn with_config_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Pam {
            config_dirs: dirs.into_iter().map(Into::into).collect(),
            legacy_config: None,
        }
    }

    fn check_service(&self, service: &str) -> Result<(), PlatformError> {
        if service.is_empty() || service.contains('/') || service == "." || service == ".." {
            return Err(PlatformError::InvalidService(service.to_string()));
        }
        if self.config_dirs.iter().any(|dir| dir.join(service).is_file()) {
            return Ok(());
        }
        // pam.conf is only consulted when the primary pam.d directory is absent
        let pam_d_absent = self.config_dirs.first().is_none_or(|dir| !dir.is_dir());
        match &self.legacy_config {
            Some(conf) if pam_d_absent && legacy_config_declares(conf, service) => Ok(()),
            _ => Err(PlatformError::UnknownService(service.to_string())),
        }
    }
}

// pam.conf lines read `service type control module-path [args]`
fn legacy_config_declares(conf: &Path, service: &str) -> bool {
    match fs::read_to_string(conf) {
        Ok(contents) => contents
            .lines()
            .map(str::trim_start)
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| line.split_whitespace().next())
            .any(|name| name == service),
        Err(e) => {
            debug!(path = %conf.display(), error = %e, "could not read PAM configuration");
            false
        }
    }
}

impl Default for Pam {
    fn default() -> Self {
        Pam::new()
    }
}

impl PlatformService for Pam {
    type Handle = PamHandle;

    fn open(&self, service: &str) -> Result<PamHandle, PlatformError> {
        self.check_service(service)?;
        let auth = pam_auth::Authenticator::with_password(service)?;
        Ok(PamHandle {
            service: service.to_string(),
            auth,
        })
    }
}

/// A PAM transaction. The transaction is ended when the handle is dropped.
pub struct PamHandle {
    service: String,
    auth: pam_auth::Authenticator<'static, pam_auth::PasswordConv>,
}

impl fmt::Debug for PamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PamHandle").field("service", &self.service).finish_non_exhaustive()
    }
}

impl PlatformHandle for PamHandle {
    fn authenticate(&mut self, username: &str, password: &str) -> Result<UnixUser, PlatformError> {
        self.auth.get_handler().set_credentials(username, password);
        self.auth.authenticate()?;
        lookup_user(username)
    }
}

fn lookup_user(username: &str) -> Result<UnixUser, PlatformError> {
    let user = User::from_name(username)?.ok_or_else(|| PlatformError::UnknownUser(username.to_string()))?;
    let mut groups = Vec::new();
    for gid in group_ids(&user)? {
        // gids without a group entry have no name to map to a role
        if let Some(group) = Group::from_gid(gid)? {
            groups.push(group.name);
        }
    }
    Ok(UnixUser::new(user.name, user.uid.as_raw(), groups))
}

#[cfg(not(any(target_vendor = "apple", target_os = "redox", target_os = "haiku")))]
fn group_ids(user: &User) -> Result<Vec<Gid>, PlatformError> {
    let name = std::ffi::CString::new(user.name.as_str()).map_err(|_| PlatformError::UnknownUser(user.name.clone()))?;
    Ok(nix::unistd::getgrouplist(&name, user.gid)?)
}

// getgrouplist is not available here, so only the primary group is reported
#[cfg(any(target_vendor = "apple", target_os = "redox", target_os = "haiku"))]
fn group_ids(user: &User) -> Result<Vec<Gid>, PlatformError> {
    Ok(vec![user.gid])
}
