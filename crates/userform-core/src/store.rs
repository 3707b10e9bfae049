//! UserStore trait definition

use async_trait::async_trait;

use crate::user::{NewUser, User};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Could not reach the database or acquire a connection
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The database rejected the statement (constraint, width, ...)
    #[error("database error: {0}")]
    Database(String),
}

/// Persistence service for user records.
///
/// Implementations must assign a fresh, unique `id` on every successful
/// insert and must have committed the row before `insert_user` returns.
/// Concurrent inserts may commit in either order.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create the `users` table if it does not exist yet.
    ///
    /// Safe to call any number of times.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Insert a new user and commit it.
    async fn insert_user(&self, input: NewUser) -> Result<User, StoreError>;

    /// All users, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
}
