//! Authentication primitives.
//!
//! - [`password`] -- Argon2 hashing and verification of the admin credentials.
//! - [`jwt`] -- HS256 bearer-token issuance and validation.

pub mod jwt;
pub mod password;
