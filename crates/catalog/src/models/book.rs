//! Aggregated book listing records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgConnection};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{
    BookFilter, BookListQueryBuilder, Identified, Page, STATEMENT_TIMEOUT, distinct_by_id,
};
use crate::error::CatalogResult;

/// Author reference carried inside a listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    /// First and last name joined by a single space.
    pub fullname: String,
}

/// Genre reference carried inside a listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreSummary {
    pub id: Uuid,
    pub title: String,
}

/// One book in a listing, with its authors and genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookListItem {
    pub id: Uuid,
    pub title: String,
    pub publisher: Option<String>,
    pub released_date: NaiveDate,

    /// Image path, empty when the book has no image.
    pub image: String,

    /// Distinct authors, unordered.
    pub authors: Vec<AuthorSummary>,

    /// Distinct genres, unordered.
    pub genres: Vec<GenreSummary>,
}

impl Identified for BookListItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BookListItem {
    /// List books matching `filter`, ordered by release date.
    pub async fn list(
        conn: &mut PgConnection,
        filter: BookFilter,
        page: Page,
    ) -> CatalogResult<Vec<Self>> {
        filter.validate()?;

        let sql = BookListQueryBuilder::new(filter, page).build();
        debug!(%sql, "listing books");

        let mut tx = conn.begin().await?;
        sqlx::query(STATEMENT_TIMEOUT).execute(&mut *tx).await?;

        let rows: Vec<serde_json::Value> =
            sqlx::query_scalar(&format!("SELECT row_to_json(t) FROM ({sql}) t"))
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        let books = rows
            .into_iter()
            .map(serde_json::from_value::<BookListItem>)
            .collect::<Result<Vec<_>, _>>()?;

        let books = distinct_by_id(books);
        debug!(rows = books.len(), "listed books");
        Ok(books)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_aggregated_row() {
        let row = json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Dune",
            "publisher": "Chilton",
            "released_date": "1965-08-01",
            "image": "covers/dune.jpg",
            "authors": [
                {"id": "00000000-0000-0000-0000-00000000000a", "fullname": "Frank Herbert"}
            ],
            "genres": [
                {"id": "00000000-0000-0000-0000-0000000000b1", "title": "Science Fiction"},
                {"id": "00000000-0000-0000-0000-0000000000b2", "title": "Adventure"}
            ]
        });

        let book: BookListItem = serde_json::from_value(row).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(
            book.released_date,
            NaiveDate::from_ymd_opt(1965, 8, 1).unwrap()
        );
        assert_eq!(book.authors.len(), 1);
        assert_eq!(book.authors[0].fullname, "Frank Herbert");
        assert_eq!(book.genres.len(), 2);
    }

    #[test]
    fn decodes_null_publisher_and_empty_image() {
        let row = json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "title": "Untitled",
            "publisher": null,
            "released_date": "2001-01-01",
            "image": "",
            "authors": [],
            "genres": []
        });

        let book: BookListItem = serde_json::from_value(row).unwrap();
        assert!(book.publisher.is_none());
        assert!(book.image.is_empty());
    }

    #[test]
    fn missing_field_is_decode_error() {
        let row = json!({"id": "00000000-0000-0000-0000-000000000003", "title": "Partial"});
        assert!(serde_json::from_value::<BookListItem>(row).is_err());
    }
}
