// Core types for the userform service
//
// This crate is DB-agnostic. Storage backends implement `UserStore`:
// - InMemoryUserStore (here): tests and local runs
// - PgUserStore (userform-storage): production

pub mod memory;
pub mod store;
pub mod user;

pub use memory::InMemoryUserStore;
pub use store::{StoreError, UserStore};
pub use user::{NewUser, User};
