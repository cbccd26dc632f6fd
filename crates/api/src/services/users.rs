//! User registration, lookup and membership changes.

use belva_core::error::CoreError;
use belva_core::membership::MembershipStatus;
use belva_core::pagination::Page;
use belva_core::types::DbId;
use belva_core::validation::validate;
use belva_db::models::user::{CreateUser, User};
use belva_db::repositories::user_repo::EMAIL_CONSTRAINT;
use belva_db::repositories::UserRepo;
use belva_db::{is_unique_violation, DbPool};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;

/// Primary key constraint on `users.id`, hit when a client re-registers an
/// identity it already used.
const ID_CONSTRAINT: &str = "users_pkey";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    /// Identity assigned by the frontend's auth provider, if any.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[serde(default)]
    pub preferred_mode_of_communication: String,
    #[serde(default)]
    pub want_to_receive_text: bool,
}

#[derive(Debug, Deserialize)]
pub struct MembershipStatusRequest {
    #[serde(default)]
    pub membership_status: String,
}

pub async fn register(pool: &DbPool, input: RegisterUserRequest) -> AppResult<User> {
    validate(&input)?;

    let id = match input.id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<DbId>()
                .map_err(|_| CoreError::Validation("id must be a valid UUID".into()))?,
        ),
    };

    let create = CreateUser {
        id,
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        company_name: input.company_name,
        phone_number: input.phone_number,
        preferred_mode_of_communication: input.preferred_mode_of_communication,
        want_to_receive_text: input.want_to_receive_text,
    };

    match UserRepo::create(pool, &create).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            Ok(user)
        }
        Err(e) if is_unique_violation(&e, EMAIL_CONSTRAINT) => {
            Err(CoreError::Conflict("User with this email exists".into()).into())
        }
        Err(e) if is_unique_violation(&e, ID_CONSTRAINT) => {
            Err(CoreError::Conflict("User with this id exists".into()).into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get(pool: &DbPool, raw_id: &str) -> AppResult<User> {
    let id = super::parse_id(raw_id, "User")?;
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("User").into())
}

pub async fn update_membership(
    pool: &DbPool,
    raw_id: &str,
    input: MembershipStatusRequest,
) -> AppResult<User> {
    let id = super::parse_id(raw_id, "User")?;
    let status = MembershipStatus::from_wire(&input.membership_status)?;

    let user = UserRepo::update_membership_status(pool, id, status)
        .await?
        .ok_or_else(|| CoreError::not_found("User"))?;
    tracing::info!(user_id = %user.id, status = %status, "Membership status updated");
    Ok(user)
}

pub async fn list(pool: &DbPool, page: Page) -> AppResult<Vec<User>> {
    Ok(UserRepo::list(pool, page.offset(), page.limit).await?)
}
