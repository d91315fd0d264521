//! The user store: an owned, single-writer container for the user list and
//! its load status. Every change goes through one of the operations below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::{User, UserDraft};

/// Where the store reads the collection from and, optionally, writes changes to.
pub trait UserBackend {
    async fn fetch_all(&self) -> Result<Vec<User>>;
    async fn create(&self, draft: &UserDraft) -> Result<()>;
    async fn update(&self, user: &User) -> Result<()>;
    async fn delete(&self, id: u64) -> Result<()>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserStore {
    users: Vec<User>,
    #[serde(skip)]
    loading: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    loaded: bool,
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    synced_at: Option<DateTime<Utc>>,
}

fn first_id() -> u64 {
    1
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: false,
            error: None,
            loaded: false,
            next_id: first_id(),
            synced_at: None,
        }
    }
}

impl UserStore {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[cfg(test)]
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.synced_at
    }

    /// Replace the whole list with a fresh copy from the backend.
    ///
    /// On failure the list is left as it was and the message is kept in
    /// [`UserStore::error`] until the next load starts.
    pub async fn load_all<B: UserBackend>(&mut self, backend: &B) -> Result<usize> {
        self.loading = true;
        self.error = None;
        debug!("loading all users");

        match backend.fetch_all().await {
            Ok(users) => {
                let max_id = users.iter().map(|u| u.id).max().unwrap_or(0);
                self.next_id = self.next_id.max(max_id.saturating_add(1));
                self.users = users;
                self.loading = false;
                self.loaded = true;
                self.synced_at = Some(Utc::now());
                info!(count = self.users.len(), "loaded users");
                Ok(self.users.len())
            }
            Err(e) => {
                self.loading = false;
                self.error = Some(e.to_string());
                warn!(error = %e, "failed to load users");
                Err(e)
            }
        }
    }

    /// Load only if no bulk load has ever succeeded. An emptied list stays empty.
    pub async fn ensure_loaded<B: UserBackend>(&mut self, backend: &B) -> Result<()> {
        if !self.loaded {
            self.load_all(backend).await?;
        }
        Ok(())
    }

    pub async fn create<B: UserBackend>(&mut self, backend: &B, draft: UserDraft) -> Result<&User> {
        draft.validate()?;
        backend.create(&draft).await?;

        let id = self.next_id;
        self.next_id += 1;
        self.users.push(User::new(id, draft));
        info!(id, "created user");

        Ok(&self.users[self.users.len() - 1])
    }

    /// Replace the first user with the same id in place. Returns `false`
    /// without touching anything when no user matches.
    pub async fn update<B: UserBackend>(&mut self, backend: &B, user: User) -> Result<bool> {
        user.fields.validate()?;
        let Some(index) = self.users.iter().position(|u| u.id == user.id) else {
            debug!(id = user.id, "update skipped, no such user");
            return Ok(false);
        };

        backend.update(&user).await?;
        info!(id = user.id, "updated user");
        self.users[index] = user;
        Ok(true)
    }

    /// Remove every user with this id and return how many were removed.
    pub async fn delete<B: UserBackend>(&mut self, backend: &B, id: u64) -> Result<usize> {
        if !self.users.iter().any(|u| u.id == id) {
            debug!(id, "delete skipped, no such user");
            return Ok(0);
        }

        backend.delete(id).await?;
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        let removed = before - self.users.len();
        info!(id, removed, "deleted user");
        Ok(removed)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeBackend;
    use super::*;
    use crate::error::UsersError;
    use crate::types::sample_draft;

    fn user(id: u64, name: &str) -> User {
        User::new(id, sample_draft(name, &format!("{}@x.com", name.to_lowercase())))
    }

    async fn loaded_store(users: Vec<User>) -> (UserStore, FakeBackend) {
        let backend = FakeBackend::with_users(users);
        let mut store = UserStore::default();
        store.load_all(&backend).await.unwrap();
        (store, backend)
    }

    #[tokio::test]
    async fn test_load_all_keeps_server_order() {
        let (store, _) = loaded_store(vec![user(3, "C"), user(1, "A"), user(2, "B")]).await;

        let ids: Vec<u64> = store.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(!store.loading());
        assert!(store.error().is_none());
        assert!(store.is_loaded());
        assert!(store.synced_at().is_some());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_users_and_sets_error() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;
        let before = store.users().to_vec();

        backend.fail_fetch.set(true);
        let err = store.load_all(&backend).await.unwrap_err();

        assert!(matches!(err, UsersError::ApiError { status: 503, .. }));
        assert_eq!(store.users(), before.as_slice());
        assert!(!store.loading());
        let message = store.error().unwrap();
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn test_new_load_clears_previous_error() {
        let backend = FakeBackend::with_users(vec![user(1, "A")]);
        let mut store = UserStore::default();

        backend.fail_fetch.set(true);
        assert!(store.load_all(&backend).await.is_err());
        assert!(store.error().is_some());
        assert!(!store.is_loaded());

        backend.fail_fetch.set(false);
        store.load_all(&backend).await.unwrap();
        assert!(store.error().is_none());
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_create_appends_with_fresh_id() {
        let (mut store, backend) = loaded_store(vec![user(1, "A"), user(10, "J")]).await;
        let draft = sample_draft("B", "b@x.com");

        let created = store.create(&backend, draft.clone()).await.unwrap().clone();

        assert_eq!(store.users().len(), 3);
        assert_eq!(created.fields, draft);
        assert_eq!(created.id, 11);
        assert_eq!(store.users().last(), Some(&created));
    }

    #[tokio::test]
    async fn test_create_never_reuses_deleted_id() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;

        let first = store.create(&backend, sample_draft("B", "b@x.com")).await.unwrap().id;
        store.delete(&backend, first).await.unwrap();
        let second = store.create(&backend, sample_draft("C", "c@x.com")).await.unwrap().id;

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;

        let err = store.create(&backend, sample_draft("", "b@x.com")).await.unwrap_err();

        assert!(matches!(err, UsersError::InvalidUser { field: "name", .. }));
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (mut store, backend) =
            loaded_store(vec![user(1, "A"), user(2, "B"), user(3, "C")]).await;
        let mut record = store.get(2).unwrap().clone();
        record.fields.name = "B2".to_string();

        assert!(store.update(&backend, record.clone()).await.unwrap());

        assert_eq!(store.users().len(), 3);
        assert_eq!(store.users()[1], record);
        assert_eq!(store.users()[0], user(1, "A"));
        assert_eq!(store.users()[2], user(3, "C"));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;
        let before = store.clone();

        assert!(!store.update(&backend, user(99, "Z")).await.unwrap());

        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_delete_removes_user() {
        let (mut store, backend) = loaded_store(vec![user(1, "A"), user(2, "B")]).await;

        assert_eq!(store.delete(&backend, 1).await.unwrap(), 1);

        assert_eq!(store.users().len(), 1);
        assert!(store.get(1).is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_all_duplicates() {
        let (mut store, backend) = loaded_store(vec![user(4, "A"), user(5, "B"), user(4, "C")]).await;

        assert_eq!(store.delete(&backend, 4).await.unwrap(), 2);

        assert_eq!(store.users(), &[user(5, "B")]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;
        let before = store.clone();

        assert_eq!(store.delete(&backend, 42).await.unwrap(), 0);

        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_ensure_loaded_does_not_resurrect_deleted_users() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;
        store.delete(&backend, 1).await.unwrap();

        store.ensure_loaded(&backend).await.unwrap();

        assert!(store.users().is_empty());
        assert_eq!(backend.fetches.get(), 1);
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_once() {
        let backend = FakeBackend::with_users(vec![user(1, "A")]);
        let mut store = UserStore::default();

        store.ensure_loaded(&backend).await.unwrap();
        store.ensure_loaded(&backend).await.unwrap();

        assert_eq!(backend.fetches.get(), 1);
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_remote_writes_leave_state_unchanged() {
        let (mut store, backend) = loaded_store(vec![user(1, "A")]).await;
        backend.fail_writes.set(true);
        let before = store.clone();

        assert!(store.create(&backend, sample_draft("B", "b@x.com")).await.is_err());
        assert!(store.update(&backend, user(1, "A2")).await.is_err());
        assert!(store.delete(&backend, 1).await.is_err());

        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_load_create_update_delete_scenario() {
        let backend = FakeBackend::with_users(vec![user(1, "A")]);
        let mut store = UserStore::default();

        store.load_all(&backend).await.unwrap();
        assert_eq!(store.users().len(), 1);

        store.create(&backend, sample_draft("B", "b@x.com")).await.unwrap();
        assert_eq!(store.users().len(), 2);

        let mut renamed = store.get(1).unwrap().clone();
        renamed.fields.name = "A2".to_string();
        store.update(&backend, renamed).await.unwrap();
        assert_eq!(store.get(1).unwrap().name(), "A2");

        store.delete(&backend, 1).await.unwrap();
        let names: Vec<&str> = store.users().iter().map(User::name).collect();
        assert_eq!(names, vec!["B"]);
    }
}
