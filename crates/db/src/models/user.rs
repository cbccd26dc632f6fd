//! User entity model and DTOs.

use belva_core::membership::MembershipStatus;
use belva_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `users` table. Contains nothing secret, so it is also
/// the API representation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub phone_number: String,
    pub preferred_mode_of_communication: String,
    pub want_to_receive_text: bool,
    #[sqlx(try_from = "String")]
    pub membership_status: MembershipStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user.
///
/// `id` is optional: the frontend may register users under the identity its
/// auth provider already assigned.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Option<DbId>,
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub phone_number: String,
    pub preferred_mode_of_communication: String,
    pub want_to_receive_text: bool,
}
