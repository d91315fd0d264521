pub mod delete;
pub mod form;
pub mod init;
pub mod list;
pub mod refresh;
pub mod show;
pub mod status;

use crate::client::UsersClient;
use crate::config::Config;
use crate::error::Result;
use crate::state_file::StateFile;
use crate::store::{UserBackend, UserStore};

/// The store for one invocation, with the backend it talks through and the
/// file it is saved to.
pub struct Session<B = UsersClient> {
    pub store: UserStore,
    pub client: B,
    state: StateFile,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        let client = UsersClient::from_config(config)?;
        let state = StateFile::new(config.state_path()?);
        let store = state.load()?;
        Ok(Self { store, client, state })
    }
}

impl<B: UserBackend> Session<B> {
    #[cfg(test)]
    pub fn new(store: UserStore, client: B, state: StateFile) -> Self {
        Self { store, client, state }
    }

    /// Save the current store so the next invocation sees it.
    pub fn commit(&self) -> Result<()> {
        self.state.save(&self.store)
    }

    pub fn state_path(&self) -> &std::path::Path {
        self.state.path()
    }

    /// Run a bulk load and save the outcome, including a failure message.
    pub async fn load_all(&mut self) -> Result<usize> {
        let outcome = self.store.load_all(&self.client).await;
        self.commit()?;
        outcome
    }

    /// Load if no load ever succeeded. Saves only when a load actually ran.
    pub async fn ensure_loaded(&mut self) -> Result<()> {
        let was_loaded = self.store.is_loaded();
        let outcome = self.store.ensure_loaded(&self.client).await;
        if !was_loaded {
            self.commit()?;
        }
        outcome
    }
}
