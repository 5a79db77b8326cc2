//! Pagination types and utilities for consistent pagination across list endpoints

use crate::error::{PaginationInfo, ResponseMetadata};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Standard pagination parameters for list endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema, Clone)]
pub struct PaginationParams {
    #[param(example = 1, minimum = 1)]
    pub page: Option<u32>,

    #[param(example = 20, minimum = 1, maximum = 100)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Get the page number (defaults to 1, minimum 1)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the page size (defaults to 20, clamped between 1 and 100)
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }

    /// Calculate the offset for SQL queries
    ///
    /// Computed in i64 so an extreme `page` value cannot wrap in release
    /// builds and alias an earlier page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page()) - 1) * i64::from(self.page_size())
    }

    /// Get the limit for SQL queries
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size())
    }

    /// Calculate total pages given a total count
    pub fn total_pages(&self, total_count: i64) -> u32 {
        if total_count == 0 {
            return 1;
        }
        ((total_count as f64) / (f64::from(self.page_size()))).ceil() as u32
    }

    /// Create response metadata with pagination info
    pub fn to_metadata(&self, total_count: i64) -> ResponseMetadata {
        let total_pages = self.total_pages(total_count);

        ResponseMetadata {
            pagination: Some(PaginationInfo {
                page: self.page() as i32,
                page_size: self.page_size() as i32,
                total_pages: total_pages as i32,
                has_next: self.page() < total_pages,
                has_previous: self.page() > 1,
            }),
            total_count: Some(total_count),
            request_id: None,
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams {
            page: None,
            page_size: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 20);
    }

    #[test]
    fn test_pagination_offset() {
        let params = PaginationParams {
            page: Some(3),
            page_size: Some(10),
        };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_total_pages() {
        let params = PaginationParams {
            page: Some(1),
            page_size: Some(20),
        };
        assert_eq!(params.total_pages(100), 5);
        assert_eq!(params.total_pages(101), 6);
        assert_eq!(params.total_pages(0), 1);
    }

    #[test]
    fn test_to_metadata_middle_page() {
        let params = PaginationParams {
            page: Some(2),
            page_size: Some(20),
        };
        let metadata = params.to_metadata(100);

        let pagination = metadata.pagination.unwrap();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total_pages, 5);
        assert!(pagination.has_next);
        assert!(pagination.has_previous);
        assert_eq!(metadata.total_count, Some(100));
    }

    #[test]
    fn test_to_metadata_last_page() {
        let params = PaginationParams {
            page: Some(5),
            page_size: Some(20),
        };
        let metadata = params.to_metadata(100);

        let pagination = metadata.pagination.unwrap();
        assert!(pagination.has_previous);
        assert!(!pagination.has_next);
    }

    #[test]
    fn test_offset_for_extreme_page_does_not_wrap() {
        let params = PaginationParams {
            page: Some(u32::MAX),
            page_size: Some(100),
        };
        assert_eq!(params.offset(), (i64::from(u32::MAX) - 1) * 100);
    }

    #[test]
    fn test_page_clamps() {
        let params = PaginationParams {
            page: Some(0),
            page_size: Some(200),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 100);
    }
}
