use serde::{Deserialize, Serialize};

/// Success body of every admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Error body; only `message` is relied on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Pagination {
    #[must_use]
    pub fn new(page: u32, limit: u32, total: u32) -> Self {
        let limit = limit.max(1);
        Self {
            page: page.max(1),
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wraps an unpaginated response as a single page.
    #[must_use]
    pub fn single(items: Vec<T>) -> Self {
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            pagination: Pagination::new(1, total.max(1), total),
            items,
        }
    }

    /// Slices `all` into the requested page.
    #[must_use]
    pub fn slice(all: Vec<T>, page: u32, limit: u32) -> Self {
        let total = u32::try_from(all.len()).unwrap_or(u32::MAX);
        let pagination = Pagination::new(page, limit, total);
        let skip = (pagination.page as usize - 1) * pagination.limit as usize;
        let items = all
            .into_iter()
            .skip(skip)
            .take(pagination.limit as usize)
            .collect();
        Self { items, pagination }
    }

    #[must_use]
    pub fn from_envelope(envelope: Envelope<Vec<T>>) -> Self {
        match envelope.pagination {
            Some(pagination) => Self {
                items: envelope.data,
                pagination,
            },
            None => Self::single(envelope.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_counts_pages() {
        let p = Pagination::new(2, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_previous());
        assert!(p.has_next());
        assert!(!Pagination::new(1, 10, 0).has_next());
    }

    #[test]
    fn slice_returns_requested_window() {
        let page = Page::slice((1..=25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        let past_end = Page::slice((1..=5).collect::<Vec<_>>(), 4, 10);
        assert!(past_end.items.is_empty());
    }

    #[test]
    fn envelope_without_pagination_is_one_page() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2,3]}"#).unwrap();
        let page = Page::from_envelope(envelope);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 1);
    }
}
