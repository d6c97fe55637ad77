//! Principals and the collection a host keeps them in.

use std::any::Any;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// An identity token issued by a realm.
///
/// Any `Debug + Display + Send + Sync + 'static` type is a principal. The [`as_any`] accessor is
/// what lets a [`PrincipalCollection`] hand back principals by their concrete type.
///
/// [`as_any`]: Principal::as_any
pub trait Principal: Debug + Display + Send + Sync + 'static {
    /// Upcasts to [`Any`] for type based lookup.
    fn as_any(&self) -> &dyn Any;
}

impl<T> Principal for T
where
    T: Debug + Display + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    realm: String,
    principal: Arc<dyn Principal>,
}

impl Entry {
    fn principal(&self) -> &dyn Principal {
        &*self.principal
    }

    fn downcast<T: Principal>(&self) -> Option<&T> {
        self.principal().as_any().downcast_ref::<T>()
    }
}

/// An ordered collection of principals, each tagged with the name of the realm that issued it.
///
/// Principals of unrelated types can live side by side. Lookups by type use
/// [`one_by_type`](PrincipalCollection::one_by_type), which yields `None` when no principal of the
/// requested type is present.
#[derive(Debug, Clone, Default)]
pub struct PrincipalCollection {
    entries: Vec<Entry>,
}

impl PrincipalCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        PrincipalCollection::default()
    }

    /// Creates a collection holding a single principal issued by `realm`.
    pub fn from_principal<P, R>(principal: P, realm: R) -> Self
    where
        P: Principal,
        R: Into<String>,
    {
        let mut principals = PrincipalCollection::new();
        principals.add(principal, realm);
        principals
    }

    /// Adds a principal issued by `realm`.
    pub fn add<P, R>(&mut self, principal: P, realm: R)
    where
        P: Principal,
        R: Into<String>,
    {
        self.entries.push(Entry {
            realm: realm.into(),
            principal: Arc::new(principal),
        });
    }

    /// Appends all principals of `other`, keeping their realm tags.
    pub fn add_all(&mut self, other: &PrincipalCollection) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// The number of principals in the collection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection holds no principals.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first principal added, if any.
    pub fn primary_principal(&self) -> Option<&dyn Principal> {
        self.entries.first().map(Entry::principal)
    }

    /// The first principal of concrete type `T`, if any.
    pub fn one_by_type<T: Principal>(&self) -> Option<&T> {
        self.entries.iter().find_map(Entry::downcast::<T>)
    }

    /// All principals of concrete type `T`, in insertion order.
    pub fn by_type<T: Principal>(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(Entry::downcast::<T>)
    }

    /// The principals issued by the realm with the given name.
    pub fn by_realm<'a>(&'a self, realm: &'a str) -> impl Iterator<Item = &'a dyn Principal> + 'a {
        self.entries.iter().filter(move |e| e.realm == realm).map(Entry::principal)
    }

    /// The distinct names of the realms that contributed principals, in first-seen order.
    pub fn realm_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.realm.as_str()) {
                names.push(&entry.realm);
            }
        }
        names
    }

    /// Iterates over all principals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Principal> {
        self.entries.iter().map(Entry::principal)
    }
}

impl Display for PrincipalCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, principal) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", principal)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Account(u32);

    impl Display for Account {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "account-{}", self.0)
        }
    }

    #[test]
    fn one_by_type_skips_unrelated_principals() {
        let mut principals = PrincipalCollection::new();
        principals.add("alice".to_string(), "ldap");
        principals.add(Account(7), "pam");
        principals.add(Account(8), "pam");

        assert_eq!(principals.one_by_type::<Account>(), Some(&Account(7)));
        assert_eq!(principals.by_type::<Account>().count(), 2);
        assert_eq!(principals.one_by_type::<String>().map(String::as_str), Some("alice"));
    }

    #[test]
    fn one_by_type_absent() {
        let principals = PrincipalCollection::from_principal("alice".to_string(), "ldap");
        assert!(principals.one_by_type::<Account>().is_none());
        assert!(PrincipalCollection::new().one_by_type::<Account>().is_none());
    }

    #[test]
    fn primary_is_first_added() {
        let mut principals = PrincipalCollection::from_principal(Account(1), "pam");
        principals.add("bob".to_string(), "ldap");

        assert_eq!(principals.primary_principal().map(|p| p.to_string()), Some("account-1".to_string()));
        assert_eq!(principals.to_string(), "[account-1, bob]");
    }

    #[test]
    fn realm_tags() {
        let mut principals = PrincipalCollection::new();
        principals.add(Account(1), "pam");
        principals.add("bob".to_string(), "ldap");
        principals.add(Account(2), "pam");

        assert_eq!(principals.realm_names(), vec!["pam", "ldap"]);
        assert_eq!(principals.by_realm("pam").count(), 2);
        assert_eq!(principals.by_realm("nis").count(), 0);

        let mut merged = PrincipalCollection::new();
        merged.add_all(&principals);
        assert_eq!(merged.len(), 3);
    }
}
