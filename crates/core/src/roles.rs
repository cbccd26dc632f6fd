//! Well-known role claim values.

/// Role carried by tokens issued from `POST /admin/login`.
pub const ROLE_ADMIN: &str = "admin";
