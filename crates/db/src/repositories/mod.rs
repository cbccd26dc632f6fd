//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod order_repo;
pub mod post_repo;
pub mod user_repo;

pub use order_repo::OrderRepo;
pub use post_repo::PostRepo;
pub use user_repo::UserRepo;
