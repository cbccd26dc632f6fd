//! Human-readable order names.
//!
//! Format: `BELVA-YYYYMMDD-xxxxxx`, where the date is the UTC creation day
//! and the suffix is the first six hex digits of a random UUID. Names are
//! unique per database (`uq_orders_order_name`); the repository regenerates on
//! the rare collision.

use chrono::NaiveDate;
use uuid::Uuid;

/// Prefix of every generated order name.
pub const ORDER_NAME_PREFIX: &str = "BELVA";

/// Length of the random suffix.
pub const ORDER_NAME_SUFFIX_LEN: usize = 6;

/// Generate an order name for the given day.
pub fn generate_order_name(date: NaiveDate) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{ORDER_NAME_PREFIX}-{}-{}",
        date.format("%Y%m%d"),
        &random[..ORDER_NAME_SUFFIX_LEN]
    )
}

/// Generate an order name for the current UTC day.
pub fn generate_order_name_now() -> String {
    generate_order_name(chrono::Utc::now().date_naive())
}
