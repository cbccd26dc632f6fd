//! Order status values and the three listing buckets derived from them.
//!
//! The wire strings are stored verbatim in `orders.status`. Two of them are
//! the bucket markers used by the admin listing: [`OrderStatus::Active`]
//! (`"quote_received"`) and [`OrderStatus::Completed`] (`"mark_completed"`).
//! Every other status falls into the pending bucket.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed set of order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Initial status of every new order.
    #[default]
    #[serde(rename = "QUOTE RECEIVED")]
    QuoteReceived,
    /// The quote was accepted and work is underway.
    #[serde(rename = "quote_received", alias = "active")]
    Active,
    /// Delivered and closed.
    #[serde(rename = "mark_completed", alias = "completed")]
    Completed,
}

/// Wire value for every variant. The first entry of each row is canonical,
/// the rest are accepted aliases.
const WIRE_TABLE: &[(OrderStatus, &[&str])] = &[
    (OrderStatus::QuoteReceived, &["QUOTE RECEIVED"]),
    (OrderStatus::Active, &["quote_received", "active"]),
    (OrderStatus::Completed, &["mark_completed", "completed"]),
];

impl OrderStatus {
    /// Canonical string stored in the database and returned to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuoteReceived => "QUOTE RECEIVED",
            Self::Active => "quote_received",
            Self::Completed => "mark_completed",
        }
    }

    /// Resolve a wire string (canonical value or alias).
    pub fn from_wire(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        WIRE_TABLE
            .iter()
            .find(|(_, names)| names.contains(&value))
            .map(|(status, _)| *status)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown order status '{value}'. Must be one of: {}",
                    Self::canonical_names().join(", ")
                ))
            })
    }

    /// Which listing bucket an order with this status belongs to.
    pub fn bucket(self) -> OrderStatusFilter {
        match self {
            Self::Active => OrderStatusFilter::Active,
            Self::Completed => OrderStatusFilter::Completed,
            Self::QuoteReceived => OrderStatusFilter::Pending,
        }
    }

    fn canonical_names() -> Vec<&'static str> {
        WIRE_TABLE.iter().map(|(s, _)| s.as_str()).collect()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_wire(&value)
    }
}

/// The `?status=` filter of the admin order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatusFilter {
    /// No filter.
    #[default]
    All,
    Active,
    Completed,
    /// Neither active nor completed.
    Pending,
}

impl OrderStatusFilter {
    /// Parse the raw query value. Empty and unrecognised values mean no filter.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            "pending" => Self::Pending,
            _ => Self::All,
        }
    }
}
