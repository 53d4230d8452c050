//! Core scope implementation for Magnet.

pub mod error;
pub mod key;
mod registry;
pub mod scope;

pub use error::{Result, ScopeError};
pub use key::DependencyKey;
pub use scope::{Scope, ScopeBuilder};

pub mod prelude {
    pub use crate::error::{Result, ScopeError};
    pub use crate::key::DependencyKey;
    pub use crate::scope::{Scope, ScopeBuilder};
}
