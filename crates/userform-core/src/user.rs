// User record (one row of the `users` table)

use serde::{Deserialize, Serialize};

/// A persisted name entry.
///
/// `id` is assigned by the store on insert and never reused. Records are
/// append-only: nothing in the system updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
}

/// Input for inserting a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
