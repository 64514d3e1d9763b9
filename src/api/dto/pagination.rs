//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters for `GET /api/users`.
///
/// Uses `serde_with` to parse numbers from query strings. Non-positive
/// values are accepted here and replaced by defaults in the service.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Returns `(page, limit)`, using `0` for absent values.
    pub fn page_and_limit(&self) -> (i64, i64) {
        (self.page.unwrap_or(0), self.limit.unwrap_or(0))
    }
}
