//! Domain types shared by every Belva crate.
//!
//! Nothing in here performs I/O. Persistence lives in `belva-db`, outbound
//! email in `belva-events`, object storage in `belva-storage` and the HTTP
//! surface in `belva-api`.

pub mod error;
pub mod membership;
pub mod order_naming;
pub mod order_status;
pub mod pagination;
pub mod post_status;
pub mod roles;
pub mod types;
pub mod uploads;
pub mod validation;
