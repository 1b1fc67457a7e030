//! Request types for the shared crate
//!
//! Common query types used across the API surface

/// Pagination query parameters
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based, default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationQuery {
    /// Get the offset into the full result set
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) as u64 * self.per_page as u64
    }

    /// Get the limit (clamped to max 100)
    pub fn limit(&self) -> u32 {
        std::cmp::min(self.per_page, 100)
    }
}

/// Combined list query: pagination plus optional filters
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,

    /// Filter by status (e.g. "pending")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Search keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_query() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.pagination.page, 1);
        assert_eq!(q.pagination.per_page, 20);
        assert!(q.status.is_none());
    }

    #[test]
    fn offset_and_limit() {
        let q = PaginationQuery { page: 3, per_page: 50 };
        assert_eq!(q.offset(), 100);
        assert_eq!(q.limit(), 50);
        let q = PaginationQuery { page: 0, per_page: 500 };
        assert_eq!(q.offset(), 0);
        assert_eq!(q.limit(), 100);
    }
}
