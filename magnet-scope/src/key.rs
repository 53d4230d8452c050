//! Type identification keys.
//!
//! A [`DependencyKey`] names one registrable type. Scopes hold at most one
//! entry per key, so the key is the whole identity of a dependency: there
//! are no qualifiers or names on top of the type.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use magnet_support::rendering::short_type_name;

/// Identifies a dependency by its Rust type.
///
/// Equality and hashing only look at the [`TypeId`]; the type name is kept
/// alongside for logs and error messages.
///
/// # Examples
/// ```
/// use magnet_scope::key::DependencyKey;
///
/// let key = DependencyKey::of::<String>();
/// assert_eq!(key.type_name(), "alloc::string::String");
/// assert_eq!(key.short_name(), "String");
/// assert_eq!(key, DependencyKey::of::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct DependencyKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl DependencyKey {
    /// Creates the key for type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] behind this key.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the type name with module paths stripped.
    pub fn short_name(&self) -> String {
        short_type_name(self.type_name)
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyKey({})", self.type_name)
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    struct Logger;

    #[test]
    fn same_type_same_key() {
        assert_eq!(DependencyKey::of::<Logger>(), DependencyKey::of::<Logger>());
    }

    #[test]
    fn different_types_different_keys() {
        assert_ne!(DependencyKey::of::<String>(), DependencyKey::of::<&'static str>());
        assert_ne!(DependencyKey::of::<Logger>(), DependencyKey::of::<Arc<Logger>>());
    }

    #[test]
    fn hashes_by_type() {
        let mut keys = HashSet::new();
        keys.insert(DependencyKey::of::<u8>());
        keys.insert(DependencyKey::of::<u8>());
        keys.insert(DependencyKey::of::<u16>());
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn names_for_display() {
        let key = DependencyKey::of::<Arc<Logger>>();
        assert!(key.type_name().contains("Logger"));
        assert_eq!(key.short_name(), "Arc<Logger>");
        assert_eq!(format!("{key}"), key.type_name());
        assert!(format!("{key:?}").starts_with("DependencyKey("));
    }

    #[test]
    fn trait_objects_have_keys() {
        trait Clock {}
        let key = DependencyKey::of::<dyn Clock>();
        assert_eq!(key, DependencyKey::of::<dyn Clock>());
    }
}
