//! Console core types: session context, route table and navigation guard

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod session;

#[cfg(any(test, feature = "tests"))]
pub mod testing;

pub use config::SessionConfig;
pub use error::{CoreError, CoreResult};
pub use guard::{Navigation, NavigationDecision, RouteGuard, Router};
pub use routes::{ROUTES, Resolved, Route, RouteRecord, View};
pub use session::{
    MemorySessionStore, Navigator, Notifier, SessionContext, SessionCredential, SessionStore,
};
