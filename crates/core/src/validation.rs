//! Conversion of `validator` failures into [`CoreError::Validation`].

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Run `validator` on `input` and flatten any failures into one message.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Render errors as `"<field> is required, <field> must be a valid email"`,
/// sorted by field name so the message is stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(list) => list
                .iter()
                .map(|e| field_message(field, &e.code))
                .collect::<Vec<_>>(),
            _ => vec![format!("{field} is invalid")],
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn field_message(field: &str, code: &str) -> String {
    match code {
        "required" | "length" => format!("{field} is required"),
        "email" => format!("{field} must be a valid email"),
        "range" => format!("{field} is out of range"),
        other => format!("{field} failed validation: {other}"),
    }
}
