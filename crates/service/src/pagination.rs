//! Pagination utilities for service layer
//!
//! Parses raw page parameters and derives offsets and page counts.

use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
    #[error("{0} must be at most {max}", max = u32::MAX)]
    TooLarge(&'static str),
}

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Parse query-string values. Absent values take the defaults; anything
    /// that is not a positive integer is rejected.
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Result<Self, PaginationError> {
        let page = match page {
            Some(raw) => positive(raw, "page")?,
            None => 1,
        };
        let per_page = match per_page {
            Some(raw) => positive(raw, "page_size")?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// `ceil(total / per_page)`, never less than 1.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit()).max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PAGE_SIZE } }
}

fn positive(raw: &str, field: &'static str) -> Result<u32, PaginationError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(PaginationError::NotPositive(field)),
        Ok(n) => u32::try_from(n).map_err(|_| PaginationError::TooLarge(field)),
    }
}
