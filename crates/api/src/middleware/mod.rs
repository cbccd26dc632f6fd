//! Request extractors for authentication, authorization and bodies.

pub mod auth;
pub mod body;
pub mod rbac;
