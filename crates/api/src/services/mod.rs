//! Request-scoped business logic. Handlers parse the HTTP request, call into
//! a service with the dependencies it needs from `AppState`, and wrap the
//! result in the response envelope.

pub mod admin;
pub mod contact;
pub mod orders;
pub mod posts;
pub mod users;

use belva_core::error::CoreError;
use belva_core::types::DbId;

/// Parse a path id. A malformed id is reported as the entity not existing.
pub fn parse_id(raw: &str, entity: &'static str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::not_found(entity))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        assert_matches!(
            parse_id("not-a-uuid", "Post"),
            Err(CoreError::NotFound { entity: "Post" })
        );
    }

    #[test]
    fn valid_id_parses() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Post").unwrap(), id);
    }
}
