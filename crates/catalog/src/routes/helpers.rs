//! Shared request parsing for catalog routes.

use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::{BookFilter, Page, PageRequest};
use crate::error::CatalogResult;
use crate::state::AppState;

/// Query string accepted by listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Title substring; ignored by genre listings.
    pub search: Option<String>,
}

impl ListParams {
    /// Normalize the requested window against the configured page size.
    pub fn page(&self, state: &AppState) -> CatalogResult<Page> {
        PageRequest::new(self.skip, self.limit).normalize(state.limits().max_page_size)
    }

    /// Book filter for this request, validated before any storage access.
    pub fn book_filter(&self, genre_id: Option<Uuid>) -> CatalogResult<BookFilter> {
        let filter = BookFilter {
            genre_id,
            search_term: self.search.clone(),
        };
        filter.validate()?;
        Ok(filter)
    }
}
