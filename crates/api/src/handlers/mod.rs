//! HTTP handlers. Each one extracts the request, calls its service and wraps
//! the result in [`ApiResponse`](crate::response::ApiResponse).

pub mod admin;
pub mod contact;
pub mod orders;
pub mod posts;
pub mod users;
