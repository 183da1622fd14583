// Paginated list result assembled from collection responses

use serde::{Deserialize, Serialize};

use crate::envelope::ListEnvelope;

/// One page of rows plus the paging arithmetic the views render.
///
/// Server-provided paging fields win when present; anything the server
/// omits is derived from `total`, `page`, and `limit`. A result is
/// immutable once built, each fetch replaces the previous one wholesale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub rows: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub paging_counter: u64,
}

impl<T> ListResult<T> {
    /// Build a result from local values, deriving the paging fields.
    pub fn new(rows: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            rows,
            total,
            page,
            limit,
            total_pages: derive_total_pages(total, limit),
            paging_counter: derive_paging_counter(total, page, limit),
        }
    }

    /// Build a result from a decoded collection envelope.
    ///
    /// `requested_page` and `requested_limit` stand in when the server
    /// omits `page`/`limit`. A missing `data` yields empty rows; rejecting
    /// that case is the access layer's call, not this type's.
    pub fn from_envelope(
        envelope: ListEnvelope<T>,
        requested_page: u32,
        requested_limit: u32,
    ) -> Self {
        let rows = envelope.data.unwrap_or_default();
        let total = envelope.total.unwrap_or(rows.len() as u64);
        let page = envelope.page.unwrap_or(requested_page);
        let limit = envelope.limit.unwrap_or(requested_limit);

        Self {
            total_pages: envelope
                .total_pages
                .unwrap_or_else(|| derive_total_pages(total, limit)),
            paging_counter: envelope
                .paging_counter
                .unwrap_or_else(|| derive_paging_counter(total, page, limit)),
            rows,
            total,
            page,
            limit,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// 1-based ordinal range of the rows on this page, for the
    /// "showing N-M of T" line. `None` when the page holds no rows.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.paging_counter;
        Some((first, first + self.rows.len() as u64 - 1))
    }
}

fn derive_total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64) as u32
}

fn derive_paging_counter(total: u64, page: u32, limit: u32) -> u64 {
    if total == 0 {
        return 0;
    }
    // Envelopes have been seen carrying page 0; clamp before subtracting.
    (page.max(1) as u64 - 1) * limit as u64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let result: ListResult<u32> = ListResult::new(vec![], 42, 1, 20);
        assert_eq!(result.total_pages, 3);

        let exact: ListResult<u32> = ListResult::new(vec![], 40, 1, 20);
        assert_eq!(exact.total_pages, 2);
    }

    #[test]
    fn test_paging_counter_for_page_two() {
        let result: ListResult<u32> = ListResult::new(vec![1, 2, 3], 42, 2, 20);
        assert_eq!(result.paging_counter, 21);
    }

    #[test]
    fn test_empty_total_zeroes_derived_fields() {
        let result: ListResult<u32> = ListResult::new(vec![], 0, 1, 20);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.paging_counter, 0);
        assert!(result.showing_range().is_none());
    }

    #[test]
    fn test_page_zero_in_the_envelope_does_not_underflow() {
        let json = r#"{"data":[1,2],"total":5,"page":0,"limit":20}"#;
        let envelope: ListEnvelope<u32> = serde_json::from_str(json).unwrap();
        let result = ListResult::from_envelope(envelope, 1, 20);
        assert_eq!(result.paging_counter, 1);

        let local: ListResult<u32> = ListResult::new(vec![], 5, 0, 20);
        assert_eq!(local.paging_counter, 1);
    }

    #[test]
    fn test_zero_limit_means_no_pages() {
        let result: ListResult<u32> = ListResult::new(vec![], 42, 1, 0);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_server_fields_win_over_derivation() {
        let json = r#"{
            "data": [1, 2],
            "total": 42,
            "page": 2,
            "limit": 20,
            "totalPages": 99,
            "pagingCounter": 77
        }"#;
        let envelope: ListEnvelope<u32> = serde_json::from_str(json).unwrap();
        let result = ListResult::from_envelope(envelope, 1, 10);
        assert_eq!(result.total_pages, 99);
        assert_eq!(result.paging_counter, 77);
        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 20);
    }

    #[test]
    fn test_omitted_fields_fall_back_to_request() {
        let json = r#"{"data":[1,2,3],"total":42}"#;
        let envelope: ListEnvelope<u32> = serde_json::from_str(json).unwrap();
        let result = ListResult::from_envelope(envelope, 2, 20);
        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 20);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.paging_counter, 21);
    }

    #[test]
    fn test_showing_range() {
        let result: ListResult<u32> = ListResult::new(vec![0; 20], 42, 2, 20);
        assert_eq!(result.showing_range(), Some((21, 40)));

        let last: ListResult<u32> = ListResult::new(vec![0; 2], 42, 3, 20);
        assert_eq!(last.showing_range(), Some((41, 42)));
    }
}
