//! Contact form delivery to the site admin.

use belva_core::validation::validate;
use belva_events::{Mailer, OutgoingEmail};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub firstname: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub lastname: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub message: String,
}

pub fn compose(admin_email: &str, input: &ContactRequest) -> OutgoingEmail {
    let subject = format!("Contact from: {} {}", input.firstname, input.lastname);
    let body = format!(
        "Name: {} {}\nEmail: {}\n\n{}",
        input.firstname, input.lastname, input.email, input.message
    );
    OutgoingEmail::new(admin_email, subject, body)
}

/// Send the message directly: unlike order notices, a failed send fails the
/// request.
pub async fn send(mailer: &dyn Mailer, admin_email: &str, input: &ContactRequest) -> AppResult<()> {
    validate(input)?;

    mailer.send(compose(admin_email, input)).await.map_err(|e| {
        tracing::warn!(error = %e, "Contact email failed");
        AppError::BadRequest("Failed to send contact email".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_names_the_sender() {
        let input = ContactRequest {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: "ada@example.com".into(),
            message: "Do you print on canvas?".into(),
        };
        let email = compose("admin@belva.test", &input);
        assert_eq!(email.to, "admin@belva.test");
        assert_eq!(email.subject, "Contact from: Ada Lovelace");
        assert!(email.body.contains("ada@example.com"));
        assert!(email.body.ends_with("Do you print on canvas?"));
    }
}
