//! Shared query parameter types for API handlers.

use belva_core::order_status::OrderStatusFilter;
use belva_core::pagination::Page;
use serde::Deserialize;

/// `?page=&limit=`. Values are kept as raw strings so malformed numbers fall
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// `?page=&limit=&status=` for the admin order listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
}

impl OrderListParams {
    pub fn page(&self) -> Page {
        Page::from_raw(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn filter(&self) -> OrderStatusFilter {
        OrderStatusFilter::parse(self.status.as_deref())
    }
}
