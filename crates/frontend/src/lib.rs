//! Browser front-end of the admin console
//!
//! Wires the session context to `localStorage`, `window.location` and toast messages,
//! and runs the route guard on every `hashchange`.

pub mod app;
pub mod auth_guard;
pub mod browser;
pub mod logging;

pub use app::App;
pub use auth_guard::HashRouter;
pub use browser::{LocalStorageStore, LocationNavigator, ToastNotifier};
