//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL JSONB document store via Diesel
//! - **memory**: in-process document store for tests and database-less runs
//! - **identity**: bearer token verification against a JWKS endpoint
//!
//! Adapters translate between domain types and infrastructure
//! representations; access rules live in the domain services.

pub mod identity;
pub mod memory;
pub mod persistence;
