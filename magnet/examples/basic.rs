//! Composing an application scope and a per-request subscope.
//!
//! Run with `RUST_LOG=magnet_scope=trace` to watch registrations and lookups.

use magnet::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// === Define your traits and types ===

trait Logger: Send + Sync {
    fn log(&self, msg: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

struct PrefixedLogger {
    prefix: String,
}

impl Logger for PrefixedLogger {
    fn log(&self, msg: &str) {
        println!("[{}] {msg}", self.prefix);
    }
}

#[derive(Clone)]
struct Config {
    database_url: String,
}

struct Database {
    url: String,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        format!("{sql} -> results from {}", self.url)
    }
}

struct Session {
    user_id: u64,
}

fn handle_request(app: &Scope<'_>, user_id: u64) {
    let mut request = app.create_subscope_named(format!("request-{user_id}"));
    request.register(Session { user_id });
    request.register::<Arc<dyn Logger>>(Arc::new(PrefixedLogger {
        prefix: format!("user {user_id}"),
    }));

    let session = request.require::<Session>();
    let logger = request.require::<Arc<dyn Logger>>();
    let db = request.require::<Arc<Database>>();

    logger.log(&db.query(&format!(
        "SELECT * FROM users WHERE id = {}",
        session.user_id
    )));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // === Composition root ===
    let mut app = Scope::named("app");
    app.register(Config {
        database_url: "postgres://localhost/app".into(),
    });
    app.register::<Arc<dyn Logger>>(Arc::new(ConsoleLogger));

    let url = app.require::<Config>().database_url.clone();
    app.register_with(move || {
        tracing::info!(url = %url, "Connecting to database");
        Arc::new(Database { url })
    });

    app.require::<Arc<dyn Logger>>().log("application scope ready");

    for user_id in [1, 2] {
        handle_request(&app, user_id);
    }

    // Request entries never leak into the application scope.
    assert!(app.get::<Session>().is_none());

    if let Err(err) = app.try_require::<Session>() {
        println!("\n{err}");
    }
}
