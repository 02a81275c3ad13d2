//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`DocumentStore`, `IdentityVerifier`) are implemented by
//! outbound adapters; driving ports (`UserDirectory`, `FoodListings`,
//! `FoodRequests`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod document_store;
mod food_listings;
mod food_requests;
mod identity_verifier;
mod user_directory;

#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{
    DeleteOutcome, DocumentStore, DocumentStoreError, FindOptions, SortSpec, UpdateOutcome,
};
#[cfg(test)]
pub use food_listings::MockFoodListings;
pub use food_listings::FoodListings;
#[cfg(test)]
pub use food_requests::MockFoodRequests;
pub use food_requests::FoodRequests;
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityVerificationError, IdentityVerifier};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
