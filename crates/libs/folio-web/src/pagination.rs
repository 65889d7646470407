//! Pagination query parameters shared by the list endpoints.

use serde::Deserialize;

/// Default page size when `limit` is not provided.
pub const DEFAULT_LIMIT: i64 = 100;

/// `?skip=N&limit=M` query string, both optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Records to skip; negative values clamp to zero.
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Maximum records to return; negative values clamp to zero.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Pagination::default();
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let page = Pagination {
            skip: Some(-5),
            limit: Some(-1),
        };
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), 0);
    }
}
