//! Catalog record types and their storage reads.

pub mod book;
pub mod genre;

pub use book::{AuthorSummary, BookListItem, GenreSummary};
pub use genre::Genre;

use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Parse a textual identifier into a UUID.
///
/// Fails with `InvalidArgument` before any storage access.
pub fn parse_id(raw: &str) -> CatalogResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CatalogError::InvalidArgument(format!("malformed identifier: {raw:?}")))
}
