//! Shared response envelope types for API handlers.

use menagerie_core::query::Pagination;
use serde::Serialize;

/// One page of a list response: `{ items, page, limit, total }`.
///
/// `page` and `limit` echo the values actually applied, after fallback.
/// `total` counts every match, not just this page.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: u64,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total,
        }
    }
}
