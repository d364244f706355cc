use serde::{Deserialize, Serialize};

use super::Resource;

/// One page of query results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse {
    /// Resources for the requested page, in final display order
    pub items: Vec<Resource>,
    /// Number of matching resources before pagination
    pub total_items: usize,
}

impl PaginatedResponse {
    /// Number of pages needed to show every matching resource
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_items.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let response = PaginatedResponse {
            items: Vec::new(),
            total_items: 10,
        };
        assert_eq!(response.total_pages(9), 2);
        assert_eq!(response.total_pages(10), 1);
        assert_eq!(response.total_pages(3), 4);
    }

    #[test]
    fn test_total_pages_empty() {
        let response = PaginatedResponse::default();
        assert_eq!(response.total_pages(9), 0);
    }
}
