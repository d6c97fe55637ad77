use std::fmt;

/// A set of role names.
///
/// Roles keep the order in which they were first inserted; duplicates are dropped. Two sets are
/// equal when they hold the same roles, whatever the order.
#[derive(Debug, Clone, Default)]
pub struct RoleSet {
    roles: Vec<String>,
}

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        RoleSet::default()
    }

    /// Adds a role. Returns `false` if it was already present.
    pub fn insert<S: Into<String>>(&mut self, role: S) -> bool {
        let role = role.into();
        if self.contains(&role) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Returns `true` if the role is present.
    pub fn contains(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns `true` if every given role is present.
    pub fn contains_all<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        roles.into_iter().all(|r| self.contains(r.as_ref()))
    }

    /// The number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if there are no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterates over the roles in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

impl PartialEq for RoleSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.contains_all(other.iter())
    }
}

impl Eq for RoleSet {}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut roles = RoleSet::new();
        roles.extend(iter);
        roles
    }
}

impl<S: Into<String>> Extend<S> for RoleSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

impl IntoIterator for RoleSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.into_iter()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.roles.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let roles: RoleSet = ["wheel", "users", "wheel", "audio"].into_iter().collect();

        assert_eq!(roles.len(), 3);
        assert_eq!(roles.iter().collect::<Vec<_>>(), vec!["wheel", "users", "audio"]);
        assert_eq!(roles.to_string(), "[wheel, users, audio]");
    }

    #[test]
    fn equality_ignores_order() {
        let a: RoleSet = ["wheel", "users"].into_iter().collect();
        let b: RoleSet = ["users", "wheel"].into_iter().collect();
        let c: RoleSet = ["users"].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(c, a);
    }

    #[test]
    fn contains_all() {
        let roles: RoleSet = ["wheel", "users"].into_iter().collect();

        assert!(roles.contains_all(["users"]));
        assert!(roles.contains_all(Vec::<String>::new()));
        assert!(!roles.contains_all(["users", "docker"]));
    }
}
