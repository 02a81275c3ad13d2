//! PostgreSQL persistence adapter using Diesel with `diesel-async` and `bb8`.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) are internal;
//! only the pool and the [`DieselDocumentStore`] adapter are exposed.
//!
//! # Example
//!
//! ```ignore
//! use plateshare::outbound::persistence::{DbPool, DieselDocumentStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/plateshare")).await?;
//! let store = DieselDocumentStore::new(pool);
//! ```

mod diesel_document_store;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_document_store::DieselDocumentStore;
pub use pool::{DbPool, PoolConfig, PoolError};
