//! In-memory implementation of UserStore for testing

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::store::{StoreError, UserStore};
use crate::user::{NewUser, User};

struct Table {
    rows: Vec<User>,
    // Wider than `User::id` so that exhaustion is detectable
    next_id: i64,
}

/// In-memory implementation of UserStore
///
/// Mirrors the Postgres semantics that matter to callers: ids start at 1,
/// increase monotonically and are never handed out twice. Rows and the id
/// counter share one lock so concurrent inserts cannot collide.
///
/// # Example
///
/// ```
/// use userform_core::InMemoryUserStore;
///
/// let store = InMemoryUserStore::new();
/// assert_eq!(store.len(), 0);
/// ```
pub struct InMemoryUserStore {
    table: Mutex<Table>,
    unavailable: Mutex<Option<String>>,
}

impl InMemoryUserStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: Vec::new(),
                next_id: 1,
            }),
            unavailable: Mutex::new(None),
        }
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.table.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every subsequent operation fail with `StoreError::Unavailable`.
    ///
    /// Passing `None` restores normal operation.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.unavailable.lock() = reason.map(str::to_string);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match self.unavailable.lock().as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn insert_user(&self, input: NewUser) -> Result<User, StoreError> {
        self.check_available()?;

        let mut table = self.table.lock();
        let id = i32::try_from(table.next_id)
            .map_err(|_| StoreError::Database("users id sequence exhausted".to_string()))?;
        let user = User {
            id,
            name: input.name,
        };
        table.next_id += 1;
        table.rows.push(user.clone());

        tracing::debug!(id = user.id, "inserted user");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.check_available()?;
        Ok(self.table.lock().rows.clone())
    }
}
