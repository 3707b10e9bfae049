//! PostgreSQL implementation of UserStore
//!
//! Every write runs in its own transaction: the insert and the commit
//! either both happen or the transaction is dropped and rolled back.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};
use userform_core::{NewUser, StoreError, User, UserStore};

use crate::repositories::Database;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    name: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
        }
    }
}

/// PostgreSQL implementation of UserStore
///
/// # Example
///
/// ```ignore
/// use userform_storage::{Database, PgUserStore};
///
/// let db = Database::from_url("postgres://localhost/user_data").await?;
/// let store = PgUserStore::new(db);
/// store.initialize().await?;
/// ```
#[derive(Clone)]
pub struct PgUserStore {
    db: Database,
}

impl PgUserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

/// Connection-level failures map to `Unavailable`; everything the server
/// itself rejected maps to `Database`.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        other => StoreError::Database(other.to_string()),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn initialize(&self) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255)
            )
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to create users table: {}", e);
            map_sqlx_error(e)
        })?;

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!("users table ready");
        Ok(())
    }

    #[instrument(skip(self, input))]
    async fn insert_user(&self, input: NewUser) -> Result<User, StoreError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert user: {}", e);
            map_sqlx_error(e)
        })?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit user insert: {}", e);
            map_sqlx_error(e)
        })?;

        debug!(id = row.id, "inserted user");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }

    #[test]
    fn test_null_name_becomes_empty() {
        let user = User::from(UserRow { id: 3, name: None });
        assert_eq!(user.name, "");
    }
}
