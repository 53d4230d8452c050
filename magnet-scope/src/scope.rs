//! # Scope
//!
//! A [`Scope`] stores at most one instance per type and hands it back by
//! type. Scopes form a chain: a subscope borrows its parent, resolves
//! through it on a local miss, and never writes to it.
//!
//! ```text
//!   app        Logger, Database
//!    │
//!    └─ request     Session, Logger (shadows app's Logger)
//! ```
//!
//! # Examples
//! ```rust
//! use magnet_scope::Scope;
//!
//! #[derive(Debug, PartialEq)]
//! struct Logger(&'static str);
//! struct Session(u64);
//!
//! let mut app = Scope::named("app");
//! app.register(Logger("console"));
//!
//! let mut request = app.create_subscope_named("request");
//! request.register(Session(42));
//!
//! assert_eq!(request.require::<Logger>(), &Logger("console"));
//! assert_eq!(request.require::<Session>().0, 42);
//! assert!(app.get::<Session>().is_none());
//! ```

use std::any::Any;
use std::fmt;

use magnet_support::rendering::closest_matches;
use tracing::{debug, trace, warn};

use crate::error::{DuplicateRegistrationError, MissingDependencyError, Result, ScopeError};
use crate::key::DependencyKey;
use crate::registry::{Entry, Registry};

/// How many "did you mean?" suggestions a missing dependency error carries
/// unless configured otherwise.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

const UNNAMED: &str = "<unnamed>";

// ═══════════════════════════════════════════
// ScopeBuilder
// ═══════════════════════════════════════════

/// Configures a [`Scope`] before creating it.
///
/// # Examples
/// ```rust
/// use magnet_scope::Scope;
///
/// let app = Scope::builder().name("app").suggestion_limit(5).build();
/// let request = Scope::builder().name("request").parent(&app).build();
///
/// assert_eq!(request.depth(), 1);
/// assert_eq!(request.suggestion_limit(), 5);
/// ```
#[derive(Debug, Default)]
pub struct ScopeBuilder<'p> {
    name: Option<String>,
    parent: Option<&'p Scope<'p>>,
    suggestion_limit: Option<usize>,
}

impl<'p> ScopeBuilder<'p> {
    /// Labels the scope in logs and error messages.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Chains the scope under `parent`.
    pub fn parent(mut self, parent: &'p Scope<'p>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Caps "did you mean?" suggestions. Inherited from the parent if unset.
    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = Some(limit);
        self
    }

    /// Creates the empty scope.
    pub fn build(self) -> Scope<'p> {
        let suggestion_limit = self
            .suggestion_limit
            .or_else(|| self.parent.map(|p| p.suggestion_limit))
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT);

        let scope = Scope {
            name: self.name,
            parent: self.parent,
            registry: Registry::new(),
            suggestion_limit,
        };
        debug!(
            scope = scope.label(),
            parent = scope.parent.map(Scope::label),
            depth = scope.depth(),
            "Created scope"
        );
        scope
    }
}

// ═══════════════════════════════════════════
// Scope
// ═══════════════════════════════════════════

/// A type-keyed store holding at most one instance per type.
///
/// Lookups check the local entries first, then walk up the parent chain
/// one level at a time. Nothing resolved from a parent is cached locally,
/// so every lookup costs O(depth).
///
/// Registration takes `&mut self` and a subscope holds `&'p Scope`, so a
/// parent cannot change while any of its subscopes is alive and cannot be
/// dropped before them.
pub struct Scope<'p> {
    name: Option<String>,
    parent: Option<&'p Scope<'p>>,
    registry: Registry,
    suggestion_limit: usize,
}

impl<'p> Scope<'p> {
    /// Creates an empty, unnamed root scope.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates an empty root scope with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::builder().name(name).build()
    }

    /// Starts configuring a scope.
    pub fn builder() -> ScopeBuilder<'p> {
        ScopeBuilder::default()
    }

    /// Creates an empty subscope resolving through `self`.
    pub fn create_subscope(&self) -> Scope<'_> {
        Scope::builder().parent(self).build()
    }

    /// Creates an empty, named subscope resolving through `self`.
    pub fn create_subscope_named(&self, name: impl Into<String>) -> Scope<'_> {
        Scope::builder().name(name).parent(self).build()
    }

    // ── Registration ──

    /// Registers `instance` as this scope's `T`.
    ///
    /// # Panics
    /// If this scope already holds a `T`. Parent entries do not count: a
    /// subscope may register a `T` to shadow its parent's.
    #[track_caller]
    pub fn register<T: Send + Sync + 'static>(&mut self, instance: T) {
        if let Err(err) = self.try_register(instance) {
            panic!("{err}");
        }
    }

    /// Registers `instance`, returning an error instead of panicking on a
    /// duplicate.
    ///
    /// # Errors
    /// [`ScopeError::DuplicateRegistration`] if this scope already holds a `T`.
    pub fn try_register<T: Send + Sync + 'static>(&mut self, instance: T) -> Result<()> {
        self.insert(DependencyKey::of::<T>(), Entry::ready(instance))
    }

    /// Registers a factory building this scope's `T` on first lookup.
    ///
    /// The factory runs at most once, and not at all if `T` is never
    /// resolved from this scope.
    ///
    /// # Panics
    /// If this scope already holds a `T`.
    #[track_caller]
    pub fn register_with<T, F>(&mut self, factory: F)
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        if let Err(err) = self.try_register_with(factory) {
            panic!("{err}");
        }
    }

    /// Lazy registration returning an error instead of panicking.
    ///
    /// # Errors
    /// [`ScopeError::DuplicateRegistration`] if this scope already holds a `T`.
    pub fn try_register_with<T, F>(&mut self, factory: F) -> Result<()>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        self.insert(DependencyKey::of::<T>(), Entry::lazy(factory))
    }

    fn insert(&mut self, key: DependencyKey, entry: Entry) -> Result<()> {
        let lazy = entry.is_lazy();

        if self.registry.insert(key, entry).is_err() {
            warn!(key = %key, scope = self.label(), "Duplicate registration rejected");
            return Err(ScopeError::DuplicateRegistration(DuplicateRegistrationError {
                key,
                scope: self.label().to_string(),
            }));
        }

        debug!(key = %key, scope = self.label(), lazy, "Registered dependency");
        Ok(())
    }

    // ── Lookup ──

    /// Returns the nearest `T` on the chain, or `None`.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.lookup(&DependencyKey::of::<T>())?.downcast_ref::<T>()
    }

    /// Returns a clone of the nearest `T` on the chain.
    ///
    /// Register `Arc<T>` for cheap sharing.
    pub fn get_cloned<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.get::<T>().cloned()
    }

    /// Returns the nearest `T` on the chain.
    ///
    /// # Panics
    /// If no scope on the chain holds a `T`.
    #[track_caller]
    pub fn require<T: Send + Sync + 'static>(&self) -> &T {
        match self.try_require::<T>() {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the nearest `T` on the chain, or an error describing where
    /// it was looked for.
    ///
    /// # Errors
    /// [`ScopeError::MissingDependency`] if no scope on the chain holds a `T`.
    pub fn try_require<T: Send + Sync + 'static>(&self) -> Result<&T> {
        let key = DependencyKey::of::<T>();
        self.get::<T>().ok_or_else(|| {
            warn!(key = %key, scope = self.label(), "Required dependency is missing");
            self.missing(key)
        })
    }

    /// Whether any scope on the chain holds a `T`.
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let key = DependencyKey::of::<T>();
        self.chain().any(|scope| scope.registry.contains(&key))
    }

    /// Whether this scope itself holds a `T`.
    pub fn contains_local<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(&DependencyKey::of::<T>())
    }

    fn lookup(&self, key: &DependencyKey) -> Option<&(dyn Any + Send + Sync)> {
        for (hops, scope) in self.chain().enumerate() {
            if let Some(entry) = scope.registry.get(key) {
                trace!(key = %key, from = self.label(), found_in = scope.label(), hops, "Resolved");
                return Some(entry.instance());
            }
        }

        trace!(key = %key, scope = self.label(), "Not found on chain");
        None
    }

    fn missing(&self, key: DependencyKey) -> ScopeError {
        let mut searched: Vec<String> = self.chain().map(|s| s.label().to_string()).collect();
        searched.reverse();

        let mut available: Vec<&'static str> = self
            .chain()
            .flat_map(|s| s.registry.type_names())
            .collect();
        available.sort_unstable();
        available.dedup();

        ScopeError::MissingDependency(MissingDependencyError {
            requested: key,
            searched,
            suggestions: closest_matches(key.type_name(), &available, self.suggestion_limit),
        })
    }

    // ── Introspection ──

    /// This scope followed by its ancestors, nearest first.
    fn chain(&self) -> impl Iterator<Item = &Scope<'p>> {
        std::iter::successors(Some(self), |scope| scope.parent)
    }

    /// The scope's name, if it was given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }

    /// The scope this one resolves through.
    pub fn parent(&self) -> Option<&'p Scope<'p>> {
        self.parent
    }

    /// Number of ancestors: 0 for a root scope.
    pub fn depth(&self) -> usize {
        self.chain().count() - 1
    }

    /// Number of local entries.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether this scope has no local entries.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Fully qualified names of the local entries, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.registry.type_names()
    }

    /// Maximum number of "did you mean?" suggestions in errors.
    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }
}

impl Default for Scope<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.label())
            .field("depth", &self.depth())
            .field("registered", &self.registry.len())
            .field("parent", &self.parent.map(Scope::label))
            .finish()
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
