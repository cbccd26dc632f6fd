//! Repository for the `orders` table.
//!
//! Every read joins `users` so rows come back as [`Order`] with the owner's
//! email and membership status attached.

use belva_core::order_naming::generate_order_name_now;
use belva_core::order_status::{OrderStatus, OrderStatusFilter};
use belva_core::types::DbId;
use sqlx::PgPool;

use crate::is_unique_violation;
use crate::models::order::{CreateOrder, Order, OrdersCount};

/// Columns of an order joined with its user (`o` = orders, `u` = users).
const JOINED_COLUMNS: &str = "o.id, o.user_id, u.email AS user_email, \
    u.membership_status AS user_membership_status, o.order_name, o.product_name, \
    o.product_description, o.shoot_type, o.finish_type, o.quantity, o.details, o.shots, \
    o.delivery_speed, o.status, o.created_at, o.updated_at";

/// Unique constraint on `orders.order_name`.
pub const ORDER_NAME_CONSTRAINT: &str = "uq_orders_order_name";

/// How many freshly generated names to try before giving up on a collision.
pub const MAX_ORDER_NAME_ATTEMPTS: usize = 3;

/// Provides CRUD and listing operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order under a generated order name.
    ///
    /// A collision on the order name is retried with a new name, at most
    /// [`MAX_ORDER_NAME_ATTEMPTS`] times in total. Status starts at the
    /// column default (`QUOTE RECEIVED`).
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let mut attempt = 1;
        loop {
            let order_name = generate_order_name_now();
            match Self::insert(pool, input, &order_name).await {
                Err(e)
                    if attempt < MAX_ORDER_NAME_ATTEMPTS
                        && is_unique_violation(&e, ORDER_NAME_CONSTRAINT) =>
                {
                    tracing::warn!(attempt, order_name, "Order name collision, regenerating");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn insert(
        pool: &PgPool,
        input: &CreateOrder,
        order_name: &str,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "WITH o AS (
                INSERT INTO orders (user_id, order_name, product_name, product_description,
                                    shoot_type, finish_type, quantity, details, shots,
                                    delivery_speed)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM o JOIN users u ON u.id = o.user_id"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(order_name)
            .bind(&input.product_name)
            .bind(&input.product_description)
            .bind(&input.shoot_type)
            .bind(&input.finish_type)
            .bind(input.quantity)
            .bind(&input.details)
            .bind(&input.shots)
            .bind(&input.delivery_speed)
            .fetch_one(pool)
            .await
    }

    /// Find an order by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM orders o JOIN users u ON u.id = o.user_id
             WHERE o.id = $1"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a user's orders, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM orders o JOIN users u ON u.id = o.user_id
             WHERE o.user_id = $1
             ORDER BY o.created_at DESC, o.id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of orders matching `filter`, plus the aggregate counts.
    ///
    /// The page and the counts are read in a single REPEATABLE READ
    /// transaction, and the three counts come from one statement, so
    /// `total == active + completed + pending` holds for the returned value.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        filter: OrderStatusFilter,
    ) -> Result<(Vec<Order>, OrdersCount), sqlx::Error> {
        let active = OrderStatus::Active.as_str();
        let completed = OrderStatus::Completed.as_str();

        let (where_clause, binds): (&str, Vec<&str>) = match filter {
            OrderStatusFilter::All => ("", vec![]),
            OrderStatusFilter::Active => ("WHERE o.status = $3", vec![active]),
            OrderStatusFilter::Completed => ("WHERE o.status = $3", vec![completed]),
            OrderStatusFilter::Pending => (
                "WHERE o.status <> $3 AND o.status <> $4",
                vec![active, completed],
            ),
        };

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM orders o JOIN users u ON u.id = o.user_id
             {where_clause}
             ORDER BY o.created_at DESC, o.id
             LIMIT $1 OFFSET $2"
        );
        let mut page = sqlx::query_as::<_, Order>(&query).bind(limit).bind(offset);
        for value in binds {
            page = page.bind(value);
        }
        let orders = page.fetch_all(&mut *tx).await?;

        let (total, active_count, completed_count): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = $1),
                    COUNT(*) FILTER (WHERE status = $2)
             FROM orders",
        )
        .bind(active)
        .bind(completed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((
            orders,
            OrdersCount::from_totals(total, active_count, completed_count),
        ))
    }

    /// Overwrite an order's status (last writer wins).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "WITH o AS (
                UPDATE orders SET status = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM o JOIN users u ON u.id = o.user_id"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
