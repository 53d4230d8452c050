//! The local mapping: entries registered directly on one scope.
//!
//! The registry maps a [`DependencyKey`] to exactly one [`Entry`]. It knows
//! nothing about parents; walking the chain is the scope's job.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry as Slot;
use std::fmt;

use once_cell::sync::Lazy;

use crate::key::DependencyKey;

/// A type-erased stored instance.
pub(crate) type Instance = Box<dyn Any + Send + Sync>;

/// Builds a lazily registered instance. Runs at most once.
pub(crate) type LazyFactory = Box<dyn FnOnce() -> Instance + Send>;

/// The single instance a scope holds for one type.
pub(crate) enum Entry {
    /// Instance handed over at registration.
    Ready(Instance),
    /// Instance built by its factory on first lookup.
    Lazy(Lazy<Instance, LazyFactory>),
}

impl Entry {
    pub fn ready<T: Send + Sync + 'static>(instance: T) -> Self {
        Entry::Ready(Box::new(instance))
    }

    pub fn lazy<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let factory: LazyFactory = Box::new(move || Box::new(factory()) as Instance);
        Entry::Lazy(Lazy::new(factory))
    }

    /// Returns the instance, running the factory first if needed.
    pub fn instance(&self) -> &(dyn Any + Send + Sync) {
        match self {
            Entry::Ready(instance) => instance.as_ref(),
            Entry::Lazy(cell) => Lazy::force(cell).as_ref(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Entry::Lazy(_))
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Ready(_) => f.write_str("Ready"),
            Entry::Lazy(_) => f.write_str("Lazy"),
        }
    }
}

/// Stores the entries of a single scope.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: HashMap<DependencyKey, Entry>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry unless the key is already taken.
    ///
    /// On a duplicate the existing entry is kept and the rejected one is
    /// handed back.
    pub fn insert(&mut self, key: DependencyKey, entry: Entry) -> Result<(), Entry> {
        match self.entries.entry(key) {
            Slot::Occupied(_) => Err(entry),
            Slot::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &DependencyKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fully qualified names of every registered type, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().map(DependencyKey::type_name).collect();
        names.sort_unstable();
        names
    }
}
