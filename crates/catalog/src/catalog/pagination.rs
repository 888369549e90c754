//! Page window normalization.
//!
//! Every listing operation runs its `limit`/`skip` through [`PageRequest::normalize`]
//! before a query is built, so the storage layer never sees a page larger
//! than the configured maximum or a negative offset.

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Process-wide page size ceiling used when none is configured.
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 30;

/// Pagination input exactly as the calling layer received it.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// A normalized page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u64,
    skip: u64,
}

impl Page {
    /// Number of rows to return (already clamped).
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows to skip.
    pub fn skip(&self) -> u64 {
        self.skip
    }
}

impl PageRequest {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self { skip, limit }
    }

    /// Clamp the request against `max_page_size`.
    ///
    /// The effective limit is `min(limit, max_page_size)`. A negative limit is
    /// rejected; a negative skip is treated as 0.
    pub fn normalize(&self, max_page_size: u64) -> CatalogResult<Page> {
        let requested = self.limit.unwrap_or(DEFAULT_LIMIT);
        let Ok(limit) = u64::try_from(requested) else {
            return Err(CatalogError::InvalidArgument(format!(
                "limit must not be negative (got {requested})"
            )));
        };

        let limit = if limit > max_page_size {
            debug!(
                requested = limit,
                capped = max_page_size,
                "limit exceeds maximum page size, capping"
            );
            max_page_size
        } else {
            limit
        };

        let skip = u64::try_from(self.skip.unwrap_or(0)).unwrap_or(0);

        Ok(Page { limit, skip })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let page = PageRequest::default().normalize(30).unwrap();
        assert_eq!(page.limit(), 10);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn limit_above_maximum_is_capped() {
        for requested in [31, 50, 1_000, i64::MAX] {
            let page = PageRequest::new(None, Some(requested))
                .normalize(30)
                .unwrap();
            assert_eq!(page.limit(), 30, "requested {requested}");
        }
    }

    #[test]
    fn limit_within_maximum_passes_through() {
        let page = PageRequest::new(Some(5), Some(30)).normalize(30).unwrap();
        assert_eq!(page.limit(), 30);
        assert_eq!(page.skip(), 5);

        let page = PageRequest::new(None, Some(0)).normalize(30).unwrap();
        assert_eq!(page.limit(), 0);
    }

    #[test]
    fn negative_skip_becomes_zero() {
        let page = PageRequest::new(Some(-7), Some(10)).normalize(30).unwrap();
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn large_skip_is_kept() {
        let page = PageRequest::new(Some(10_000), None).normalize(30).unwrap();
        assert_eq!(page.skip(), 10_000);
    }

    #[test]
    fn negative_limit_is_rejected() {
        let err = PageRequest::new(Some(0), Some(-1))
            .normalize(30)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert!(err.to_string().contains("-1"));
    }
}
