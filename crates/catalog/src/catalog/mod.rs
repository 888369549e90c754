//! Catalog query layer.
//!
//! This module provides:
//! - Pagination: clamps `limit`/`skip` to the process-wide page size
//! - BookListQueryBuilder: SeaQuery-based aggregated book listing
//! - GenreQuery / GenreClosureQuery: genre forest traversal
//! - Materializer: order-preserving de-duplication of result rows

mod book_query;
mod hierarchy;
mod materialize;
mod pagination;
pub(crate) mod schema;

pub use book_query::{BookFilter, BookListQueryBuilder};
pub use hierarchy::{GenreClosureQuery, GenreDirection, GenreQuery};
pub use materialize::{Identified, distinct_by_id};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_MAX_PAGE_SIZE, Page, PageRequest};

/// Bounds every catalog read transaction.
pub(crate) const STATEMENT_TIMEOUT: &str = "SET LOCAL statement_timeout = '10s'";
