//! Domain models and request/response DTOs.

use utoipa::ToSchema;

pub mod case;
pub mod document;

// Re-export commonly used types
pub use case::{
    CaseListResponse, CaseOptionsResponse, CasePriority, CaseResponse, CaseStatsResponse,
    CaseStatus, CreateCaseRequest, ListCasesQuery, SearchCasesQuery, SearchCasesResponse,
    UpdateCaseRequest,
};
pub use document::{
    CreateDocumentRequest, DocumentListResponse, DocumentOptionsResponse, DocumentResponse,
    DocumentStatus, DocumentType, ListDocumentsQuery, UpdateDocumentRequest,
};

/// Pagination metadata for list responses.
#[derive(Debug, Clone, serde::Serialize, ToSchema)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination metadata from the requested page and the total row count.
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Pagination {
            page,
            per_page,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1 && total > 0,
        }
    }
}

pub(crate) fn default_page() -> u64 {
    1
}

pub(crate) fn default_per_page() -> u64 {
    10
}

/// Clamp a caller-supplied page size into the allowed range.
pub(crate) fn clamp_per_page(per_page: u64) -> u64 {
    per_page.clamp(1, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_metadata() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = Pagination::new(3, 10, 25);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_clamp_per_page() {
        assert_eq!(clamp_per_page(0), 1);
        assert_eq!(clamp_per_page(10), 10);
        assert_eq!(clamp_per_page(1000), 100);
    }
}
