//! Pagination and search query parameters.

use serde::{Deserialize, Serialize};

use linkhub_core::types::{ListQuery, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 25, max: 100).
    #[serde(default = "default_page_size", alias = "per_page")]
    pub page_size: u64,
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Query parameters for searchable list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size", alias = "per_page")]
    pub page_size: u64,
    /// Case-insensitive match on the title or name column.
    pub search: Option<String>,
}

impl ListParams {
    /// Converts to a `ListQuery`, dropping a blank search term.
    pub fn into_list_query(self) -> ListQuery {
        ListQuery::new(PageRequest::new(self.page, self.page_size), self.search)
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_clamped() {
        let page = PaginationParams {
            page: 0,
            page_size: 500,
        }
        .into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = ListParams {
            page: 2,
            page_size: 10,
            search: Some("   ".into()),
        }
        .into_list_query();
        assert!(query.search.is_none());
        assert_eq!(query.page.offset(), 10);
    }
}
