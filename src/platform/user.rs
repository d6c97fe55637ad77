/// A user record as known to the host.
///
/// Group names are unique and keep the order in which they were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixUser {
    name: String,
    uid: u32,
    groups: Vec<String>,
}

impl UnixUser {
    /// Creates a user record. Duplicate group names are dropped.
    pub fn new<S, I, G>(name: S, uid: u32, groups: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for group in groups {
            let group = group.into();
            if !unique.contains(&group) {
                unique.push(group);
            }
        }
        UnixUser {
            name: name.into(),
            uid,
            groups: unique,
        }
    }

    /// The canonical user name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The numeric user id.
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// The names of the groups the user is a member of.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}
