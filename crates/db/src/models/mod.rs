//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the (joined) row
//! - A create DTO for inserts
//! - Update DTOs where the entity is mutable

pub mod order;
pub mod post;
pub mod user;
