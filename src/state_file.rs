//! Persists the user store between invocations as pretty-printed JSON.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{Result, UsersError};
use crate::store::UserStore;

pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved store. A missing file is an empty store.
    pub fn load(&self) -> Result<UserStore> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no state file, starting empty");
            return Ok(UserStore::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| UsersError::StateRead {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_str(&contents).map_err(|e| UsersError::StateParse {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn save(&self, store: &UserStore) -> Result<()> {
        let contents = serde_json::to_string_pretty(store)?;
        self.write_atomic(contents.as_bytes())
            .map_err(|e| UsersError::StateWrite {
                path: self.path.clone(),
                source: e,
            })?;
        debug!(path = %self.path.display(), users = store.users().len(), "saved state");
        Ok(())
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp_path = parent.join(format!(
            ".{}.tmp.{}",
            self.path.file_name().and_then(|v| v.to_str()).unwrap_or("state"),
            nanos
        ));
        std::fs::write(&tmp_path, bytes)?;
        std::fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}
