use serde::{Deserialize, Serialize};

/// Pagination metadata carried by list responses.
///
/// `total_pages` and the two cursors are derived from `total`, `page`, and
/// `limit`; [`PageMeta::is_consistent`] checks that a received value obeys
/// the derivation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageMeta {
    /// Computes the derived paging fields for `total` items at `limit` per
    /// page, viewed from `page`.
    pub fn for_page(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            total,
            page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// Whether the derived fields agree with `total`, `page`, and `limit`.
    pub fn is_consistent(&self) -> bool {
        *self == Self::for_page(self.total, self.page, self.limit)
    }
}

/// Standard wrapper returned by every modeled endpoint: the payload plus
/// optional message, status echo, and pagination metadata.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Envelope<T> {
    /// Wraps a payload with no metadata. Handy for seeding caches in tests
    /// and optimistic updates.
    pub fn bare(data: T) -> Self {
        Self {
            data,
            message: None,
            status: None,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let meta = PageMeta::for_page(101, 1, 10);
        assert_eq!(meta.total_pages, 11);
        assert!(meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn last_page_has_no_next() {
        let meta = PageMeta::for_page(30, 3, 10);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn zero_limit_yields_zero_pages() {
        let meta = PageMeta::for_page(30, 1, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn consistency_check_rejects_bad_totals() {
        let mut meta = PageMeta::for_page(100, 2, 10);
        assert!(meta.is_consistent());
        meta.total_pages = 99;
        assert!(!meta.is_consistent());
    }

    #[test]
    fn meta_uses_camel_case_on_the_wire() {
        let meta = PageMeta::for_page(3, 1, 10);
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"totalPages\":1"));
        assert!(json.contains("\"hasNextPage\":false"));
        assert!(json.contains("\"hasPrevPage\":false"));
    }

    #[test]
    fn envelope_optional_fields_default() {
        let envelope: Envelope<Vec<i64>> = serde_json::from_str(r#"{"data":[1,2,3]}"#).unwrap();
        assert_eq!(envelope.data, vec![1, 2, 3]);
        assert!(envelope.message.is_none());
        assert!(envelope.status.is_none());
        assert!(envelope.meta.is_none());
    }
}
