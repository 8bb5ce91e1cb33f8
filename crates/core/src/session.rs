//! Session credential and the injected session context
//!
//! The credential is an opaque bearer token. Its presence is the only signal the
//! console uses to decide whether it is signed in; validity is left to the backend,
//! which answers 401 when the token is stale.

use crate::config::SessionConfig;
use crate::error::CoreResult;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Opaque bearer token proving the console's identity to the backend
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential(<redacted>)")
    }
}

impl From<String> for SessionCredential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SessionCredential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Persistent home of the session credential
///
/// Implementations hold a single entry. Concurrent writers race and the last one wins.
pub trait SessionStore: Send + Sync {
    /// Read the stored credential, if any
    fn load(&self) -> Option<SessionCredential>;

    /// Replace the stored credential
    fn save(&self, credential: &SessionCredential) -> CoreResult<()>;

    /// Delete the stored credential
    fn clear(&self) -> CoreResult<()>;
}

/// Performs full navigations that discard in-memory application state
pub trait Navigator: Send + Sync {
    fn hard_redirect(&self, href: &str);
}

/// Shows transient, non-blocking messages to the user
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// In-process credential store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<SessionCredential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a credential already present
    pub fn with_credential(credential: impl Into<SessionCredential>) -> Self {
        Self {
            credential: RwLock::new(Some(credential.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<SessionCredential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, credential: &SessionCredential) -> CoreResult<()> {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        self.credential
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

/// Everything the request pipeline and the route guard need to know about the session
///
/// Passed explicitly to both instead of reaching for a global store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SessionContext {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
        }
    }

    /// Current credential, read fresh from the store
    pub fn credential(&self) -> Option<SessionCredential> {
        self.store.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    /// Persist a credential obtained from login
    pub fn sign_in(&self, credential: &SessionCredential) -> CoreResult<()> {
        self.store.save(credential)?;
        info!("Session credential stored");
        Ok(())
    }

    /// Forget the credential without navigating
    pub fn sign_out(&self) -> CoreResult<()> {
        self.store.clear()?;
        debug!("Session credential cleared");
        Ok(())
    }

    /// Surface a message through the notifier
    pub fn notify_error(&self, message: &str) {
        self.notifier.error(message);
    }

    /// Tear down the session and restart navigation at the login screen
    ///
    /// Always performs the hard redirect, even when the store refuses to clear.
    pub fn teardown(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear session credential during teardown: {e}");
        }
        info!("Session torn down, redirecting to {}", SessionConfig::LOGIN_HREF);
        self.navigator.hard_redirect(SessionConfig::LOGIN_HREF);
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
