//! Customer membership tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Distinguishes pay-as-you-go customers from subscribed members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MembershipStatus {
    #[default]
    #[serde(rename = "PAYG")]
    Payg,
    #[serde(rename = "SUBSCRIBED")]
    Subscribed,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payg => "PAYG",
            Self::Subscribed => "SUBSCRIBED",
        }
    }

    /// Case-insensitive parse of a client supplied value.
    pub fn from_wire(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PAYG" => Ok(Self::Payg),
            "SUBSCRIBED" => Ok(Self::Subscribed),
            _ => Err(CoreError::Validation(format!(
                "Unknown membership status '{value}'. Must be one of: PAYG, SUBSCRIBED"
            ))),
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MembershipStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_wire(&value)
    }
}
