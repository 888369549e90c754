//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::{Config, QueryLimits};
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Handlers acquire their own
/// connection from the pool per request; nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Page size and traversal bounds.
    limits: QueryLimits,
}

impl AppState {
    /// Connect to the database described by `config`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;
        Ok(Self::with_pool(db, config.limits()))
    }

    /// Build state around an existing pool.
    pub fn with_pool(db: PgPool, limits: QueryLimits) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, limits }),
        }
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the query limits.
    pub fn limits(&self) -> QueryLimits {
        self.inner.limits
    }

    /// Check if PostgreSQL is healthy.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
