//! Recording test doubles for the session context

use crate::session::{MemorySessionStore, Navigator, Notifier, SessionContext};
use std::sync::{Arc, Mutex, PoisonError};

/// Navigator that remembers every hard redirect
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_redirect(&self, href: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(href.to_string());
    }
}

/// Notifier that remembers every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Build a session context over recording doubles, optionally signed in
pub fn test_context(
    credential: Option<&str>,
) -> (
    SessionContext,
    Arc<MemorySessionStore>,
    Arc<RecordingNavigator>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(match credential {
        Some(token) => MemorySessionStore::with_credential(token),
        None => MemorySessionStore::new(),
    });
    let navigator = Arc::new(RecordingNavigator::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
    (ctx, store, navigator, notifier)
}
