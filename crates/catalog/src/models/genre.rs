//! Genre records and forest traversal.

use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgConnection};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{
    GenreClosureQuery, GenreDirection, GenreQuery, Identified, Page, STATEMENT_TIMEOUT,
    distinct_by_id,
};
use crate::error::CatalogResult;

/// A node in the genre forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    /// Unique identifier.
    pub id: Uuid,

    /// Unique title.
    pub title: String,

    /// Optional description.
    pub description: Option<String>,

    /// Parent genre (NULL for base genres).
    pub parent_id: Option<Uuid>,
}

impl Identified for Genre {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Closure row with its distance from the starting genre.
#[derive(sqlx::FromRow)]
struct GenreChainRow {
    #[sqlx(flatten)]
    genre: Genre,
    depth: i32,
}

impl Genre {
    /// List genres without a parent, ordered by title.
    pub async fn list_base(conn: &mut PgConnection, page: Page) -> CatalogResult<Vec<Self>> {
        let sql = GenreQuery::base(page);
        debug!(%sql, "listing base genres");

        let genres = sqlx::query_as::<_, Genre>(&sql)
            .fetch_all(&mut *conn)
            .await?;
        debug!(rows = genres.len(), "listed base genres");
        Ok(genres)
    }

    /// List the direct children of `parent_id`, ordered by title.
    ///
    /// An unknown parent yields an empty list.
    pub async fn list_children(
        conn: &mut PgConnection,
        parent_id: Uuid,
        page: Page,
    ) -> CatalogResult<Vec<Self>> {
        let sql = GenreQuery::children(parent_id, page);
        debug!(%parent_id, %sql, "listing child genres");

        let genres = sqlx::query_as::<_, Genre>(&sql)
            .fetch_all(&mut *conn)
            .await?;
        Ok(genres)
    }

    /// Walk the forest from `genre_id` in `direction`, at most `max_depth` levels.
    ///
    /// The starting genre is excluded. Rows come back nearest first, then by
    /// title; each genre appears once even if the stored parent relation
    /// contains a cycle.
    pub async fn list_related(
        conn: &mut PgConnection,
        genre_id: Uuid,
        direction: GenreDirection,
        max_depth: u32,
    ) -> CatalogResult<Vec<Self>> {
        let sql = GenreClosureQuery::sql(direction);
        let depth = i32::try_from(max_depth).unwrap_or(i32::MAX);
        debug!(%genre_id, ?direction, max_depth = depth, "walking genre closure");

        let mut tx = conn.begin().await?;
        sqlx::query(STATEMENT_TIMEOUT).execute(&mut *tx).await?;

        let rows = sqlx::query_as::<_, GenreChainRow>(&sql)
            .bind(genre_id)
            .bind(depth)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let deepest = rows.iter().map(|row| row.depth).max().unwrap_or(0);
        if deepest >= depth && depth > 0 {
            debug!(%genre_id, depth, "genre closure reached depth limit");
        }

        Ok(distinct_by_id(rows.into_iter().map(|row| row.genre)))
    }
}
