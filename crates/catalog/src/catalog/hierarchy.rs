//! Genre forest queries.
//!
//! Genres form a forest through the nullable `genre.parent_id` column. Base
//! genres and direct children are plain paginated selects; the closure walk
//! is a recursive CTE seeded with the starting genre and extended one level
//! per iteration in an explicit [`GenreDirection`].

use sea_query::{Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement};
use uuid::Uuid;

use super::pagination::Page;
use super::schema::Genre;

const GENRE_COLUMNS: [Genre; 4] = [Genre::Id, Genre::Title, Genre::Description, Genre::ParentId];

/// Which way the closure walk follows the parent relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreDirection {
    /// Parent, grandparent, ... up to the root. Joins `genre.id = frontier.parent_id`.
    Ancestors,
    /// Children, grandchildren, ... down to the leaves. Joins `genre.parent_id = frontier.id`.
    Descendants,
}

impl GenreDirection {
    /// Join condition linking a genre `g` to the current frontier `c`.
    fn join_condition(self) -> &'static str {
        match self {
            GenreDirection::Ancestors => "g.id = c.parent_id",
            GenreDirection::Descendants => "g.parent_id = c.id",
        }
    }
}

/// Paginated selects over direct relations, ordered by title.
pub struct GenreQuery;

impl GenreQuery {
    /// Genres without a parent.
    pub fn base(page: Page) -> String {
        let mut query = Self::select();
        query.and_where(Expr::col(Genre::ParentId).is_null());
        Self::paginate(&mut query, page);
        query.to_string(PostgresQueryBuilder)
    }

    /// Genres whose parent is `parent_id`.
    pub fn children(parent_id: Uuid, page: Page) -> String {
        let mut query = Self::select();
        query.and_where(Expr::col(Genre::ParentId).eq(parent_id));
        Self::paginate(&mut query, page);
        query.to_string(PostgresQueryBuilder)
    }

    fn select() -> SelectStatement {
        let mut query = Query::select();
        query.columns(GENRE_COLUMNS).from(Genre::Table);
        query
    }

    fn paginate(query: &mut SelectStatement, page: Page) {
        query
            .order_by(Genre::Title, Order::Asc)
            .limit(page.limit())
            .offset(page.skip());
    }
}

/// Recursive closure over the genre forest.
///
/// Bind parameters: `$1` starting genre id, `$2` maximum depth (i32). The
/// starting genre is the anchor at depth 0 and is filtered out of the result.
/// The depth bound terminates the walk even if the parent relation contains
/// a cycle; repeated genres are removed by the materializer.
pub struct GenreClosureQuery;

impl GenreClosureQuery {
    pub fn sql(direction: GenreDirection) -> String {
        format!(
            r#"WITH RECURSIVE genre_chain AS (
    SELECT g.id, g.title, g.description, g.parent_id, 0 AS depth
    FROM genre g
    WHERE g.id = $1

    UNION ALL

    SELECT g.id, g.title, g.description, g.parent_id, c.depth + 1
    FROM genre g
    INNER JOIN genre_chain c ON {join}
    WHERE c.depth < $2
)
SELECT id, title, description, parent_id, depth
FROM genre_chain
WHERE id <> $1
ORDER BY depth, title"#,
            join = direction.join_condition()
        )
    }
}
