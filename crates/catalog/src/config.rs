//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

use crate::catalog::DEFAULT_MAX_PAGE_SIZE;

/// Default bound on closure walks through the genre forest.
pub const DEFAULT_MAX_GENRE_DEPTH: u32 = 32;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Upper bound for any requested page size (default: 30).
    pub max_page_size: u64,

    /// Maximum number of levels a genre closure walk follows (default: 32).
    pub max_genre_depth: u32,

    /// Per-request timeout in seconds (default: 30).
    pub request_timeout_secs: u64,
}

/// Query limits shared by all requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_page_size: u64,
    pub max_genre_depth: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_genre_depth: DEFAULT_MAX_GENRE_DEPTH,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let max_page_size = env::var("MAX_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_MAX_PAGE_SIZE.to_string())
            .parse()
            .context("MAX_PAGE_SIZE must be a valid u64")?;

        let max_genre_depth = env::var("MAX_GENRE_DEPTH")
            .unwrap_or_else(|_| DEFAULT_MAX_GENRE_DEPTH.to_string())
            .parse()
            .context("MAX_GENRE_DEPTH must be a valid u32")?;

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            max_page_size,
            max_genre_depth,
            request_timeout_secs,
        })
    }

    /// Query limits derived from this configuration.
    pub fn limits(&self) -> QueryLimits {
        QueryLimits {
            max_page_size: self.max_page_size,
            max_genre_depth: self.max_genre_depth,
        }
    }
}
