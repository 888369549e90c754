//! Libris test utilities.
//!
//! Helpers for integration testing: an isolated PostgreSQL schema per test
//! and builders for catalog fixtures.

use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Connection, PgConnection};
use uuid::Uuid;

/// DDL applied to every fresh test schema.
pub const SCHEMA: &str = include_str!("../fixtures/schema.sql");

/// A throwaway PostgreSQL schema holding the catalog tables.
///
/// Every pooled connection has its `search_path` pointed at the schema, so
/// unqualified table names resolve to this test's tables only.
pub struct TestDb {
    pub pool: PgPool,
    pub schema: String,
}

impl TestDb {
    /// Create a fresh schema, or `None` when `DATABASE_URL` is not set.
    pub async fn connect() -> Result<Option<Self>, sqlx::Error> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return Ok(None);
        };

        let schema = format!("libris_test_{}", Uuid::new_v4().simple());

        let mut admin = PgConnection::connect(&url).await?;
        sqlx::query(&format!("CREATE SCHEMA \"{schema}\""))
            .execute(&mut admin)
            .await?;
        admin.close().await?;

        let search_path = format!("SET search_path TO \"{schema}\"");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .after_connect(move |conn, _meta| {
                let sql = search_path.clone();
                Box::pin(async move {
                    sqlx::query(&sql).execute(conn).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Some(Self { pool, schema }))
    }

    /// Drop the schema and everything in it.
    pub async fn cleanup(self) -> Result<(), sqlx::Error> {
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await?;
        self.pool.close().await;
        Ok(())
    }
}

/// Create a genre fixture with no parent.
pub fn test_genre(title: &str) -> TestGenre {
    TestGenre {
        id: Uuid::now_v7(),
        title: title.to_string(),
        description: None,
        parent_id: None,
    }
}

/// A genre fixture.
#[derive(Debug, Clone)]
pub struct TestGenre {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl TestGenre {
    /// Set the parent genre.
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub async fn insert(self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query("INSERT INTO genre (id, title, description, parent_id) VALUES ($1, $2, $3, $4)")
            .bind(self.id)
            .bind(&self.title)
            .bind(&self.description)
            .bind(self.parent_id)
            .execute(pool)
            .await?;
        Ok(self)
    }
}

/// Point `genre_id` at `parent_id`, bypassing any acyclicity expectation.
pub async fn set_genre_parent(
    pool: &PgPool,
    genre_id: Uuid,
    parent_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE genre SET parent_id = $2 WHERE id = $1")
        .bind(genre_id)
        .bind(parent_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create an author fixture.
pub fn test_author(first_name: &str, last_name: &str) -> TestAuthor {
    TestAuthor {
        id: Uuid::now_v7(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

/// An author fixture.
#[derive(Debug, Clone)]
pub struct TestAuthor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl TestAuthor {
    pub fn fullname(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub async fn insert(self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query("INSERT INTO author (id, first_name, last_name) VALUES ($1, $2, $3)")
            .bind(self.id)
            .bind(&self.first_name)
            .bind(&self.last_name)
            .execute(pool)
            .await?;
        Ok(self)
    }
}

/// Create a book fixture released on `released` (`YYYY-MM-DD`).
///
/// # Panics
///
/// Panics if `released` is not a valid date.
#[allow(clippy::expect_used)]
pub fn test_book(title: &str, released: &str) -> TestBook {
    TestBook {
        id: Uuid::now_v7(),
        title: title.to_string(),
        publisher: None,
        released_date: NaiveDate::parse_from_str(released, "%Y-%m-%d")
            .expect("fixture release date must be YYYY-MM-DD"),
        images: Vec::new(),
        author_ids: Vec::new(),
        genre_ids: Vec::new(),
    }
}

/// A book fixture together with its associations.
#[derive(Debug, Clone)]
pub struct TestBook {
    pub id: Uuid,
    pub title: String,
    pub publisher: Option<String>,
    pub released_date: NaiveDate,
    pub images: Vec<String>,
    pub author_ids: Vec<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

impl TestBook {
    pub fn with_publisher(mut self, publisher: &str) -> Self {
        self.publisher = Some(publisher.to_string());
        self
    }

    pub fn with_image(mut self, path: &str) -> Self {
        self.images.push(path.to_string());
        self
    }

    pub fn with_author(mut self, author_id: Uuid) -> Self {
        self.author_ids.push(author_id);
        self
    }

    /// Associate a genre. Repeating a genre stores a duplicate association.
    pub fn with_genre(mut self, genre_id: Uuid) -> Self {
        self.genre_ids.push(genre_id);
        self
    }

    /// Insert the book and all of its association rows.
    pub async fn insert(self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO book (id, title, publisher, released_date) VALUES ($1, $2, $3, $4)",
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.publisher)
        .bind(self.released_date)
        .execute(&mut *tx)
        .await?;

        for image in &self.images {
            sqlx::query("INSERT INTO book_image (book_id, image) VALUES ($1, $2)")
                .bind(self.id)
                .bind(image)
                .execute(&mut *tx)
                .await?;
        }

        for author_id in &self.author_ids {
            sqlx::query("INSERT INTO book_author (book_id, author_id) VALUES ($1, $2)")
                .bind(self.id)
                .bind(author_id)
                .execute(&mut *tx)
                .await?;
        }

        for genre_id in &self.genre_ids {
            sqlx::query("INSERT INTO book_genre (book_id, genre_id) VALUES ($1, $2)")
                .bind(self.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(self)
    }
}
