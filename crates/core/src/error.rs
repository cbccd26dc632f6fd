/// Domain error taxonomy.
///
/// Each variant maps onto exactly one HTTP status in the api crate. Messages
/// of every variant except [`CoreError::Internal`] are shown to the client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(CoreError::not_found("Post").to_string(), "Post not found");
    }

    #[test]
    fn conflict_message_is_passed_through() {
        let err = CoreError::Conflict("User with this email exists".into());
        assert_eq!(err.to_string(), "User with this email exists");
    }
}
