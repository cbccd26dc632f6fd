//! Order creation, listing and status transitions.

use belva_core::error::CoreError;
use belva_core::order_status::{OrderStatus, OrderStatusFilter};
use belva_core::pagination::Page;
use belva_core::types::DbId;
use belva_core::validation::validate;
use belva_db::models::order::{CreateOrder, Order, OrdersCount};
use belva_db::repositories::{OrderRepo, UserRepo};
use belva_db::{is_foreign_key_violation, DbPool};
use belva_events::{NotificationDispatcher, OutgoingEmail};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

const DEFAULT_DELIVERY_SPEED: &str = "Standard";

/// Body of `POST /orders`. The owner is named by `user_id` or, failing that,
/// `user_email`. A client-sent `status` is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub shoot_type: String,
    #[serde(default)]
    pub finish_type: String,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub shots: Vec<String>,
    #[serde(default)]
    pub delivery_speed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Payload of the admin order listing.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub orders_count: OrdersCount,
}

pub async fn create(
    pool: &DbPool,
    notifier: &NotificationDispatcher,
    admin_email: &str,
    input: CreateOrderRequest,
) -> AppResult<Order> {
    validate(&input)?;

    let user_id = resolve_user(pool, &input).await?;

    let details = match input.details {
        None | Some(serde_json::Value::Null) => serde_json::Value::Object(Default::default()),
        Some(obj @ serde_json::Value::Object(_)) => obj,
        Some(_) => return Err(CoreError::Validation("details must be an object".into()).into()),
    };

    let delivery_speed = input
        .delivery_speed
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DELIVERY_SPEED.to_string());

    let create = CreateOrder {
        user_id,
        product_name: input.product_name.trim().to_string(),
        product_description: input.product_description,
        shoot_type: input.shoot_type.trim().to_string(),
        finish_type: input.finish_type,
        quantity: input.quantity.unwrap_or(1),
        details,
        shots: input.shots,
        delivery_speed,
    };

    let order = OrderRepo::create(pool, &create).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::from(CoreError::not_found("User"))
        } else {
            AppError::from(e)
        }
    })?;
    tracing::info!(order_id = %order.id, order_name = %order.order_name, "Order created");

    let report = notifier
        .dispatch(order_notifications(&order, admin_email))
        .await;
    tracing::debug!(sent = report.sent, failed = report.failed, "Order notifications finished");

    Ok(order)
}

/// `user_id` wins over `user_email`. Either must name an existing user.
async fn resolve_user(pool: &DbPool, input: &CreateOrderRequest) -> AppResult<DbId> {
    let user_id = input.user_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let user_email = input.user_email.as_deref().map(str::trim).filter(|s| !s.is_empty());

    match (user_id, user_email) {
        (Some(raw), _) => {
            let id = super::parse_id(raw, "User")?;
            if UserRepo::exists(pool, id).await? {
                Ok(id)
            } else {
                Err(CoreError::not_found("User").into())
            }
        }
        (None, Some(email)) => UserRepo::find_by_email(pool, email)
            .await?
            .map(|u| u.id)
            .ok_or_else(|| CoreError::not_found("User").into()),
        (None, None) => Err(CoreError::Validation("user_id or user_email is required".into()).into()),
    }
}

/// The confirmation to the customer and the notice to the admin.
pub fn order_notifications(order: &Order, admin_email: &str) -> Vec<OutgoingEmail> {
    let summary = format!(
        "Order: {}\nProduct: {}\nShoot type: {}\nQuantity: {}\nDelivery: {}",
        order.order_name, order.product_name, order.shoot_type, order.quantity, order.delivery_speed
    );
    vec![
        OutgoingEmail::new(
            &order.user_email,
            format!("We received your order {}", order.order_name),
            format!("Thank you for your order. We will send a quote shortly.\n\n{summary}"),
        ),
        OutgoingEmail::new(
            admin_email,
            format!("New order {} from {}", order.order_name, order.user_email),
            summary,
        ),
    ]
}

pub async fn list(pool: &DbPool, page: Page, filter: OrderStatusFilter) -> AppResult<OrderListResponse> {
    let (orders, orders_count) = OrderRepo::list(pool, page.offset(), page.limit, filter).await?;
    Ok(OrderListResponse {
        orders,
        orders_count,
    })
}

pub async fn get(pool: &DbPool, raw_id: &str) -> AppResult<Order> {
    let id = super::parse_id(raw_id, "Order")?;
    OrderRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order").into())
}

/// Orders of one user. An unknown user yields an empty page.
pub async fn list_for_user(pool: &DbPool, raw_user_id: &str, page: Page) -> AppResult<Vec<Order>> {
    let user_id = super::parse_id(raw_user_id, "User")?;
    Ok(OrderRepo::list_by_user(pool, user_id, page.offset(), page.limit).await?)
}

/// Overwrite the status. Concurrent updates are last-writer-wins.
pub async fn update_status(
    pool: &DbPool,
    raw_id: &str,
    input: UpdateStatusRequest,
) -> AppResult<Order> {
    let id = super::parse_id(raw_id, "Order")?;
    let status = OrderStatus::from_wire(&input.status)?;

    let order = OrderRepo::update_status(pool, id, status)
        .await?
        .ok_or_else(|| CoreError::not_found("Order"))?;
    tracing::info!(order_id = %order.id, status = %status, "Order status updated");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use belva_core::membership::MembershipStatus;

    use super::*;

    fn order() -> Order {
        let now = chrono::Utc::now();
        Order {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            user_email: "client@example.com".into(),
            user_membership_status: MembershipStatus::Payg,
            order_name: "BELVA-20250101-abcdef".into(),
            product_name: "Canvas Print".into(),
            product_description: String::new(),
            shoot_type: "product".into(),
            finish_type: String::new(),
            quantity: 3,
            details: serde_json::json!({}),
            shots: vec![],
            delivery_speed: "Standard".into(),
            status: OrderStatus::QuoteReceived,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn notifications_go_to_customer_and_admin() {
        let emails = order_notifications(&order(), "admin@belva.test");
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].to, "client@example.com");
        assert_eq!(emails[1].to, "admin@belva.test");
        assert!(emails.iter().all(|e| e.subject.contains("BELVA-20250101-abcdef")));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let input: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "user_email": "client@example.com",
            "product_name": "Canvas Print",
            "shoot_type": "product",
            "quantity": 0,
        }))
        .unwrap();
        assert!(validate(&input).is_err());
    }
}
