//! Browser implementations of the session store, navigator and notifier

use console_core::{
    CoreError, CoreResult, Navigator, Notifier, SessionConfig, SessionCredential, SessionStore,
};
use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Credential kept in `localStorage` under a fixed key
#[derive(Debug, Clone, Copy)]
pub struct LocalStorageStore {
    key: &'static str,
}

impl LocalStorageStore {
    pub const fn new() -> Self {
        Self {
            key: SessionConfig::CREDENTIAL_KEY,
        }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn local_storage() -> CoreResult<Storage> {
    web_sys::window()
        .ok_or_else(|| CoreError::storage("no window"))?
        .local_storage()
        .map_err(|_| CoreError::storage("localStorage access denied"))?
        .ok_or_else(|| CoreError::storage("localStorage unavailable"))
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<SessionCredential> {
        // An empty entry counts as signed out
        local_storage()
            .ok()?
            .get_item(self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
            .map(SessionCredential::new)
    }

    fn save(&self, credential: &SessionCredential) -> CoreResult<()> {
        local_storage()?
            .set_item(self.key, credential.as_str())
            .map_err(|e| CoreError::storage(format!("failed to write credential: {e:?}")))
    }

    fn clear(&self) -> CoreResult<()> {
        local_storage()?
            .remove_item(self.key)
            .map_err(|e| CoreError::storage(format!("failed to remove credential: {e:?}")))
    }
}

/// Full-page navigation through `window.location`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn hard_redirect(&self, href: &str) {
        if let Err(e) = hard_redirect(href) {
            warn!("Hard redirect to {href} failed: {e:?}");
        }
    }
}

fn hard_redirect(href: &str) -> Result<(), JsValue> {
    let location = gloo_utils::window().location();
    let target_path = href.split('#').next().unwrap_or_default();
    let same_document = target_path.is_empty() || location.pathname()? == target_path;

    location.set_href(href)?;
    // A fragment-only change keeps the document alive; reload to drop in-memory state
    if same_document {
        location.reload()?;
    }
    Ok(())
}

/// Transient error toasts appended to `<body>`
#[derive(Debug, Clone, Copy)]
pub struct ToastNotifier {
    duration_ms: u32,
}

impl ToastNotifier {
    pub const DEFAULT_DURATION_MS: u32 = 3_000;

    pub const fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION_MS)
    }
}

impl Notifier for ToastNotifier {
    fn error(&self, message: &str) {
        warn!("{message}");
        if let Err(e) = show_toast(message, self.duration_ms) {
            warn!("Failed to show toast: {e:?}");
        }
    }
}

fn show_toast(message: &str, duration_ms: u32) -> Result<(), JsValue> {
    let document = gloo_utils::document();
    let toast = document.create_element("div")?;
    toast.set_class_name("console-toast console-toast--error");
    toast.set_attribute("role", "alert")?;
    toast.set_text_content(Some(message));
    gloo_utils::body().append_child(&toast)?;

    Timeout::new(duration_ms, move || toast.remove()).forget();
    Ok(())
}
