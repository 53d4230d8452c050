//! Error types for scope operations.
//!
//! Both kinds are composition mistakes, not runtime conditions. The primary
//! API ([`Scope::register`](crate::Scope::register) and
//! [`Scope::require`](crate::Scope::require)) panics with these errors'
//! messages; the `try_*` variants hand them back for tooling that wants to
//! report them itself.

use std::fmt;

use magnet_support::rendering::render_scope_path;

use crate::key::DependencyKey;

/// Main error type for all scope operations.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// The scope already holds an entry for this type.
    #[error("{}", .0)]
    DuplicateRegistration(DuplicateRegistrationError),

    /// No scope on the chain holds an entry for this type.
    #[error("{}", .0)]
    MissingDependency(MissingDependencyError),
}

impl ScopeError {
    /// Returns the key the failed operation was about.
    pub fn key(&self) -> DependencyKey {
        match self {
            ScopeError::DuplicateRegistration(e) => e.key,
            ScopeError::MissingDependency(e) => e.requested,
        }
    }
}

/// A second registration of the same type in one scope.
#[derive(Debug)]
pub struct DuplicateRegistrationError {
    /// The type registered twice.
    pub key: DependencyKey,
    /// Name of the scope that already holds it.
    pub scope: String,
}

impl fmt::Display for DuplicateRegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dependency already registered in scope '{}': {}",
            self.scope, self.key,
        )?;
        write!(
            f,
            "\n  Hint: register it in a subscope to override the existing instance"
        )
    }
}

/// A required type that no scope on the chain could provide.
#[derive(Debug)]
pub struct MissingDependencyError {
    /// The type that was required.
    pub requested: DependencyKey,
    /// Names of the searched scopes, root first.
    pub searched: Vec<String>,
    /// Registered types with similar names.
    pub suggestions: Vec<String>,
}

impl fmt::Display for MissingDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing dependency: {}", self.requested)?;
        write!(f, "\n  Searched: {}", render_scope_path(&self.searched))?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: did you forget to call .register::<{}>()?",
            self.requested.short_name(),
        )
    }
}

/// Convenient Result type for scope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
