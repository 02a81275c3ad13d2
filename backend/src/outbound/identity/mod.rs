//! Identity provider adapters.

mod jwks_identity_verifier;

pub use jwks_identity_verifier::{JwksIdentityVerifier, JwksVerifierConfig};
