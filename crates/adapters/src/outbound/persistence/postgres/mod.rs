//! PostgreSQL implementation of the identity store.

mod identity_store;
mod models;

pub use identity_store::PgIdentityStore;
