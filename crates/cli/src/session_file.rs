//! Credential kept in a file under the data directory

use console_core::{CoreError, CoreResult, SessionConfig, SessionCredential, SessionStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`SessionStore`] backed by `<data_dir>/token`
///
/// The terminal counterpart of the browser's `localStorage` entry.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SessionConfig::CREDENTIAL_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<SessionCredential> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| SessionCredential::new(token))
    }

    fn save(&self, credential: &SessionCredential) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::storage(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(&self.path, credential.as_str())
            .map_err(|e| CoreError::storage(format!("{}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| CoreError::storage(format!("{}: {e}", self.path.display())))?;
        }

        debug!("Stored credential at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::storage(format!("{}: {e}", self.path.display()))),
        }
    }
}
