//! In-memory user store for tests and database-free runs.
//!
//! Applies the same filters, ordering and grouping as the SQL statements,
//! and can be switched into a failing state to exercise error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::StoreError;

use super::store::UserStore;
use super::types::{LastNameCount, User, UserQuery};

/// Version string reported by the mock store.
pub const MOCK_SERVER_VERSION: &str = "8.0.0-mock";

/// In-memory `UserStore`.
#[derive(Debug, Clone, Default)]
pub struct MockUserStore {
    rows: Arc<RwLock<Vec<User>>>,
    fail: Arc<AtomicBool>,
}

impl MockUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with rows.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// Add a row.
    pub fn insert(&self, user: User) {
        self.write_rows().push(user);
    }

    /// Remove every row.
    pub fn clear(&self) {
        self.write_rows().clear();
    }

    /// Make every subsequent query fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn write_rows(&self) -> std::sync::RwLockWriteGuard<'_, Vec<User>> {
        self.rows.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the rows sorted by id, or the injected fault.
    fn snapshot(&self) -> Result<Vec<User>, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("mock store set to fail".to_string()));
        }

        let mut rows = self
            .rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn server_version(&self) -> Result<String, StoreError> {
        self.snapshot()?;
        Ok(MOCK_SERVER_VERSION.to_string())
    }

    async fn users(&self, query: UserQuery) -> Result<Vec<User>, StoreError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|u| query.matches(u))
            .collect())
    }

    async fn user_count(&self) -> Result<i64, StoreError> {
        Ok(self.snapshot()?.len() as i64)
    }

    async fn last_name_counts(&self) -> Result<Vec<LastNameCount>, StoreError> {
        // `None` sorts first, as NULL does in MySQL ascending order.
        let mut groups: BTreeMap<Option<String>, i64> = BTreeMap::new();
        for user in self.snapshot()? {
            *groups.entry(user.last_name).or_default() += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(last_name, count)| LastNameCount { last_name, count })
            .collect())
    }

    async fn first_user(&self) -> Result<Option<User>, StoreError> {
        Ok(self.snapshot()?.into_iter().next())
    }
}
