//! Pagination utilities for service layer
//!
//! `PageRequest` is the normalized input (0-based page index, bounded size);
//! `Page<T>` is the JSON page envelope returned by every list endpoint.

use configs::PaginationConfig;
use serde::Serialize;

use crate::errors::ServiceError;

/// Pagination parameters after normalization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page, never 0
    pub size: u64,
}

impl PageRequest {
    /// Apply defaults and clamp `size` to `1..=max_size`.
    ///
    /// A `page` whose row offset does not fit a signed 64-bit SQL `OFFSET`
    /// is rejected.
    pub fn normalize(page: Option<u64>, size: Option<u64>, cfg: PaginationConfig) -> Result<Self, ServiceError> {
        let max = cfg.max_size.max(1);
        let size = size.unwrap_or(cfg.default_size).clamp(1, max);
        let req = Self { page: page.unwrap_or(0), size };
        if req.offset().is_none() {
            return Err(ServiceError::invalid("page", format!("{} is out of range", req.page)));
        }
        Ok(req)
    }

    /// Rows skipped before this page; `None` when it overflows `i64`.
    pub fn offset(&self) -> Option<u64> {
        self.page.checked_mul(self.size).filter(|o| *o <= i64::MAX as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        let cfg = PaginationConfig::default();
        Self { page: 0, size: cfg.default_size.clamp(1, cfg.max_size.max(1)) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u64,
    pub number: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, req: PageRequest) -> Self {
        let total_pages = total_elements.div_ceil(req.size.max(1));
        let number_of_elements = content.len() as u64;
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size: req.size,
            number: req.page,
            number_of_elements,
            first: req.page == 0,
            last: req.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PaginationConfig { PaginationConfig { default_size: 10, max_size: 100 } }

    #[test]
    fn normalize_applies_defaults() {
        let req = PageRequest::normalize(None, None, cfg()).expect("in range");
        assert_eq!(req, PageRequest { page: 0, size: 10 });
        assert_eq!(PageRequest::default(), req);
    }

    #[test]
    fn normalize_clamps_size() -> Result<(), ServiceError> {
        assert_eq!(PageRequest::normalize(Some(5), Some(1000), cfg())?.size, 100);
        assert_eq!(PageRequest::normalize(Some(5), Some(0), cfg())?.size, 1);
        assert_eq!(PageRequest::normalize(Some(5), Some(0), cfg())?.offset(), Some(5));
        Ok(())
    }

    #[test]
    fn normalize_rejects_offsets_past_i64() {
        let err = PageRequest::normalize(Some(u64::MAX), Some(10), cfg()).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.starts_with("page:")), "{err}");
        assert!(PageRequest::normalize(Some(i64::MAX as u64 / 10 + 1), Some(10), cfg()).is_err());
        assert!(PageRequest::normalize(Some(i64::MAX as u64 / 10), Some(10), cfg()).is_ok());
    }

    #[test]
    fn huge_page_index_builds_last_page() {
        let page: Page<u8> = Page::new(vec![], 3, PageRequest { page: u64::MAX, size: 10 });
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn page_arithmetic() {
        let req = PageRequest { page: 1, size: 2 };
        let page = Page::new(vec!["c", "d"], 5, req);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(!page.last);
        assert_eq!(page.number_of_elements, 2);

        let tail = Page::new(vec!["e"], 5, PageRequest { page: 2, size: 2 });
        assert!(tail.last);

        let empty: Page<&str> = Page::new(vec![], 0, PageRequest { page: 0, size: 10 });
        assert_eq!(empty.total_pages, 0);
        assert!(empty.first && empty.last && empty.empty);
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = Page::new(vec![1, 2, 3], 3, PageRequest { page: 0, size: 10 });
        let json = serde_json::to_value(&page).expect("json");
        assert_eq!(json["totalElements"], 3);
        assert_eq!(json["numberOfElements"], 3);
        assert_eq!(json["content"].as_array().map(|a| a.len()), Some(3));
    }

    #[test]
    fn map_keeps_counts() {
        let page = Page::new(vec![1, 2], 7, PageRequest { page: 0, size: 2 }).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 4);
    }
}
