//! Console bootstrap: session context, API client and router

use crate::auth_guard::HashRouter;
use crate::browser::{LocalStorageStore, LocationNavigator, ToastNotifier};
use console_core::{Navigation, Route, SessionContext};
use console_http::{ClientError, ConsoleClient};
use std::sync::Arc;

const TITLE_SUFFIX: &str = "AI API Console";

/// Running console
pub struct App {
    client: ConsoleClient,
    router: HashRouter,
}

impl App {
    /// Build the session from browser storage and start routing
    pub fn start() -> Result<Self, ClientError> {
        let session = SessionContext::new(
            Arc::new(LocalStorageStore::new()),
            Arc::new(LocationNavigator),
            Arc::new(ToastNotifier::default()),
        );

        let origin = gloo_utils::window()
            .location()
            .origin()
            .map_err(|e| ClientError::Configuration(format!("no window origin: {e:?}")))?;
        let client = ConsoleClient::new(origin, session.clone())?;

        // A stale token is only noticed when a real call comes back 401
        let router = HashRouter::install(session, render_shell);

        Ok(Self { client, router })
    }

    pub fn client(&self) -> &ConsoleClient {
        &self.client
    }

    pub fn current_route(&self) -> Option<Route> {
        self.router.current()
    }

    /// Log in and move to the dashboard
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), ClientError> {
        self.client.login(username, password).await?;
        self.router.push(Route::Dashboard);
        Ok(())
    }

    /// Drop the credential and return to the login screen
    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.client.logout()?;
        self.router.push(Route::Login);
        Ok(())
    }
}

/// Mark the active route on the document; views key off these attributes
fn render_shell(navigation: &Navigation) {
    let route = navigation.route();
    let document = gloo_utils::document();
    document.set_title(&format!("{} · {TITLE_SUFFIX}", route.name()));

    let body = gloo_utils::body();
    let _ = body.set_attribute("data-route", route.name());
    let _ = body.set_attribute("data-layout", if route.in_layout() { "shell" } else { "bare" });
}
