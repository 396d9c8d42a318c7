//! User store trait and its MySQL implementation.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::instrument;

use crate::config::Config;
use crate::error::StoreError;

use super::types::{
    LastNameCount, User, UserQuery, SELECT_FIRST_USER, SELECT_LAST_NAME_COUNTS,
    SELECT_USER_COUNT, SELECT_VERSION,
};

/// Read-only access to the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Database engine version string.
    async fn server_version(&self) -> Result<String, StoreError>;

    /// Rows selected by one of the fixed queries.
    async fn users(&self, query: UserQuery) -> Result<Vec<User>, StoreError>;

    /// Total number of rows.
    async fn user_count(&self) -> Result<i64, StoreError>;

    /// Row count per distinct last name, ascending by last name.
    async fn last_name_counts(&self) -> Result<Vec<LastNameCount>, StoreError>;

    /// Row with the smallest id, if any.
    async fn first_user(&self) -> Result<Option<User>, StoreError>;
}

/// `UserStore` backed by a MySQL pool.
#[derive(Debug, Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    /// Wrap an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration without opening a connection.
    ///
    /// Connections are established on first use, so the server starts even
    /// when the database is down; queries fail until it comes back.
    pub fn connect_lazy(config: &Config) -> Self {
        let pool = MySqlPoolOptions::new().connect_lazy_with(config.connect_options());
        Self::new(pool)
    }

    /// Underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    #[instrument(skip(self))]
    async fn server_version(&self) -> Result<String, StoreError> {
        let (version,): (String,) = sqlx::query_as(SELECT_VERSION)
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    #[instrument(skip(self, query), fields(query = %query))]
    async fn users(&self, query: UserQuery) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(query.sql())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn user_count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as(SELECT_USER_COUNT)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn last_name_counts(&self) -> Result<Vec<LastNameCount>, StoreError> {
        let rows = sqlx::query_as::<_, LastNameCount>(SELECT_LAST_NAME_COUNTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn first_user(&self) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(SELECT_FIRST_USER)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
