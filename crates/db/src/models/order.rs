//! Order entity model, DTOs and the listing aggregate.

use belva_core::membership::MembershipStatus;
use belva_core::order_status::OrderStatus;
use belva_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An order joined with the owning user's email and membership status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub user_email: String,
    #[sqlx(try_from = "String")]
    pub user_membership_status: MembershipStatus,
    pub order_name: String,
    pub product_name: String,
    pub product_description: String,
    pub shoot_type: String,
    pub finish_type: String,
    pub quantity: i32,
    pub details: serde_json::Value,
    pub shots: Vec<String>,
    pub delivery_speed: String,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an order. The order name is generated by the repository.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub user_id: DbId,
    pub product_name: String,
    pub product_description: String,
    pub shoot_type: String,
    pub finish_type: String,
    pub quantity: i32,
    pub details: serde_json::Value,
    pub shots: Vec<String>,
    pub delivery_speed: String,
}

/// Aggregate counts returned alongside every admin order listing.
///
/// `pending_orders` is derived, never queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrdersCount {
    pub total_orders: i64,
    pub active_orders: i64,
    pub completed_orders: i64,
    pub pending_orders: i64,
}

impl OrdersCount {
    pub fn from_totals(total: i64, active: i64, completed: i64) -> Self {
        Self {
            total_orders: total,
            active_orders: active,
            completed_orders: completed,
            pending_orders: total - active - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_remainder() {
        let counts = OrdersCount::from_totals(10, 3, 2);
        assert_eq!(counts.pending_orders, 5);
        assert_eq!(
            counts.total_orders,
            counts.active_orders + counts.completed_orders + counts.pending_orders
        );
    }
}
