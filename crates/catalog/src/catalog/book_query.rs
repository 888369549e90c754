//! Aggregated book listing query using SeaQuery.
//!
//! One output row per book. The book is joined to its authors and its
//! genres; for a book with k authors and m genres the join yields k*m rows,
//! which the GROUP BY collapses back into one row carrying a k-element
//! author array and an m-element genre array. Example for a genre filter
//! with limit 10 and offset 0:
//!
//! ```sql
//! SELECT b.id, b.title, b.publisher, b.released_date,
//!        COALESCE((SELECT img.image FROM book_image img
//!                  WHERE img.book_id = b.id ORDER BY img.image LIMIT 1), '') AS image,
//!        COALESCE(jsonb_agg(DISTINCT jsonb_build_object(
//!            'id', a.id, 'fullname', concat(a.first_name, ' ', a.last_name)))
//!            FILTER (WHERE a.id IS NOT NULL), '[]'::jsonb) AS authors,
//!        COALESCE(jsonb_agg(DISTINCT jsonb_build_object(
//!            'id', g.id, 'title', g.title))
//!            FILTER (WHERE g.id IS NOT NULL), '[]'::jsonb) AS genres
//! FROM book b
//! INNER JOIN book_author ba ON ba.book_id = b.id
//! INNER JOIN author a ON a.id = ba.author_id
//! INNER JOIN book_genre bg ON bg.book_id = b.id
//! INNER JOIN genre g ON g.id = bg.genre_id
//! INNER JOIN book_genre bgf ON bgf.book_id = b.id AND bgf.genre_id = :genre_id
//! GROUP BY b.id
//! ORDER BY b.released_date, b.id
//! LIMIT 10 OFFSET 0;
//! ```
//!
//! Because the genre join is an inner join, books without any genre never
//! appear in a listing.

use sea_query::{
    Alias, Cond, Expr, ExprTrait, Func, JoinType, Order, PostgresQueryBuilder, Query,
    SelectStatement, SimpleExpr, SubQueryStatement,
};
use uuid::Uuid;

use super::pagination::Page;
use super::schema::{Author, Book, BookAuthor, BookGenre, BookImage, Genre};
use crate::error::{CatalogError, CatalogResult};

const AUTHOR_OBJECT: &str = concat!(
    r#"jsonb_build_object('id', "a"."id", "#,
    r#"'fullname', concat("a"."first_name", ' ', "a"."last_name"))"#,
);

const GENRE_OBJECT: &str = r#"jsonb_build_object('id', "g"."id", 'title', "g"."title")"#;

/// Optional restrictions on a book listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Only books associated with exactly this genre.
    pub genre_id: Option<Uuid>,

    /// Case-insensitive substring of the title. Empty means no filter.
    pub search_term: Option<String>,
}

impl BookFilter {
    pub fn for_genre(genre_id: Uuid) -> Self {
        Self {
            genre_id: Some(genre_id),
            search_term: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Reject filter values PostgreSQL cannot represent in text.
    pub fn validate(&self) -> CatalogResult<()> {
        let Some(term) = self.search_term.as_deref() else {
            return Ok(());
        };
        if term.contains('\0') {
            let reason = "search term must not contain NUL characters";
            return Err(CatalogError::InvalidArgument(reason.to_string()));
        }
        Ok(())
    }
}

/// Query builder for the aggregated book listing.
pub struct BookListQueryBuilder {
    filter: BookFilter,
    page: Page,
}

impl BookListQueryBuilder {
    pub fn new(filter: BookFilter, page: Page) -> Self {
        Self { filter, page }
    }

    /// Build the listing SELECT with filters and pagination applied.
    pub fn build(&self) -> String {
        let b = Alias::new("b");
        let mut query = Query::select();

        query
            .column((b.clone(), Book::Id))
            .column((b.clone(), Book::Title))
            .column((b.clone(), Book::Publisher))
            .column((b.clone(), Book::ReleasedDate))
            .expr_as(Self::representative_image(), Alias::new("image"))
            .expr_as(collect_distinct("a", AUTHOR_OBJECT), Alias::new("authors"))
            .expr_as(collect_distinct("g", GENRE_OBJECT), Alias::new("genres"))
            .from_as(Book::Table, b.clone());

        self.add_joins(&mut query);
        self.add_filters(&mut query);

        // Pagination counts grouped books, never joined rows.
        query
            .group_by_col((b.clone(), Book::Id))
            .order_by((b.clone(), Book::ReleasedDate), Order::Asc)
            .order_by((b, Book::Id), Order::Asc)
            .limit(self.page.limit())
            .offset(self.page.skip());

        query.to_string(PostgresQueryBuilder)
    }

    /// Correlated lookup of one image per book, `''` when the book has none.
    fn representative_image() -> SimpleExpr {
        let img = Alias::new("img");
        let same_book = Expr::col((img.clone(), BookImage::BookId))
            .equals((Alias::new("b"), Book::Id));

        let mut lookup = Query::select();
        lookup
            .column((img.clone(), BookImage::Image))
            .from_as(BookImage::Table, img.clone())
            .and_where(same_book)
            .order_by((img, BookImage::Image), Order::Asc)
            .limit(1);

        Func::coalesce([
            SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(lookup))),
            Expr::val("").into(),
        ])
        .into()
    }

    /// Join the author and genre association fan-outs.
    fn add_joins(&self, query: &mut SelectStatement) {
        let b = Alias::new("b");
        let ba = Alias::new("ba");
        let a = Alias::new("a");
        let bg = Alias::new("bg");
        let g = Alias::new("g");

        query
            .join_as(
                JoinType::InnerJoin,
                BookAuthor::Table,
                ba.clone(),
                Expr::col((ba.clone(), BookAuthor::BookId)).equals((b.clone(), Book::Id)),
            )
            .join_as(
                JoinType::InnerJoin,
                Author::Table,
                a.clone(),
                Expr::col((a, Author::Id)).equals((ba, BookAuthor::AuthorId)),
            )
            .join_as(
                JoinType::InnerJoin,
                BookGenre::Table,
                bg.clone(),
                Expr::col((bg.clone(), BookGenre::BookId)).equals((b.clone(), Book::Id)),
            )
            .join_as(
                JoinType::InnerJoin,
                Genre::Table,
                g.clone(),
                Expr::col((g, Genre::Id)).equals((bg, BookGenre::GenreId)),
            );

        // The genre restriction gets its own association join so the
        // aggregated genre array still lists every genre of the book.
        if let Some(genre_id) = self.filter.genre_id {
            let bgf = Alias::new("bgf");
            let same_book = Expr::col((bgf.clone(), BookGenre::BookId)).equals((b, Book::Id));
            let same_genre = Expr::col((bgf.clone(), BookGenre::GenreId)).eq(genre_id);
            query.join_as(
                JoinType::InnerJoin,
                BookGenre::Table,
                bgf,
                Cond::all().add(same_book).add(same_genre),
            );
        }
    }

    /// Add book-level WHERE conditions.
    fn add_filters(&self, query: &mut SelectStatement) {
        let Some(term) = self.filter.search_term.as_deref() else {
            return;
        };
        if term.is_empty() {
            return;
        }
        let pattern = format!("%{}%", escape_like_wildcards(term));
        let condition = Expr::cust_with_values(r#""b"."title" ILIKE $1"#, [pattern]);
        query.and_where(condition);
    }
}

/// `jsonb_agg(DISTINCT ...)` over one side of the fan-out, defaulting to `[]`.
fn collect_distinct(table: &str, object: &str) -> SimpleExpr {
    let present = format!(r#""{table}"."id" IS NOT NULL"#);
    Expr::cust(format!(
        "COALESCE(jsonb_agg(DISTINCT {object}) FILTER (WHERE {present}), '[]'::jsonb)"
    ))
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
