//! Libris catalog library.
//!
//! Read-only query layer over a book catalog: aggregated book listings and
//! genre hierarchy traversal, exposed over HTTP by the `libris` binary.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

pub use catalog::{BookFilter, GenreDirection, Page, PageRequest};
pub use config::{Config, QueryLimits};
pub use error::{CatalogError, CatalogResult};
pub use models::{AuthorSummary, BookListItem, Genre, GenreSummary};
pub use state::AppState;
