//! # Magnet: typed dependency scopes for Rust
//!
//! A [`Scope`] holds at most one instance per type. Subscopes resolve
//! through their parent and can shadow its entries without touching it.
//!
//! ```rust
//! use magnet::prelude::*;
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, msg: &str);
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, msg: &str) { println!("{msg}"); }
//! }
//!
//! let mut app = Scope::named("app");
//! app.register::<Arc<dyn Logger>>(Arc::new(ConsoleLogger));
//!
//! let request = app.create_subscope_named("request");
//! request.require::<Arc<dyn Logger>>().log("handled");
//! ```

pub use magnet_scope::*;
pub use magnet_support::*;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::rendering;
    use std::sync::Arc;

    trait Logger: Send + Sync {
        fn name(&self) -> &'static str;
    }

    struct ConsoleLogger;

    impl Logger for ConsoleLogger {
        fn name(&self) -> &'static str {
            "console"
        }
    }

    #[derive(Debug)]
    struct Database;

    #[test]
    fn composition_root_scenario() {
        let mut scope = Scope::named("app");
        let console: Arc<dyn Logger> = Arc::new(ConsoleLogger);
        scope.register(console.clone());

        let logger = scope.require::<Arc<dyn Logger>>();
        assert!(Arc::ptr_eq(logger, &console));

        match scope.try_require::<Database>() {
            Err(ScopeError::MissingDependency(e)) => {
                assert_eq!(e.requested, DependencyKey::of::<Database>());
            }
            other => panic!("Expected MissingDependency, got: {other:?}"),
        }

        let child = scope.create_subscope_named("request");
        assert_eq!(child.get::<Arc<dyn Logger>>().map(|l| l.name()), Some("console"));
    }

    #[test]
    fn support_helpers_are_reexported() {
        assert_eq!(rendering::short_type_name("app::Database"), "Database");
    }
}
