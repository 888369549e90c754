//! Book listing routes.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;

use crate::error::CatalogResult;
use crate::models::{BookListItem, parse_id};
use crate::routes::helpers::ListParams;
use crate::state::AppState;

/// Create the book router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route("/genres/{genre_id}/books", get(list_genre_books))
}

/// GET /books?skip=&limit=&search=
async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<Vec<BookListItem>>> {
    let page = params.page(&state)?;
    let filter = params.book_filter(None)?;

    let mut conn = state.db().acquire().await?;
    let books = BookListItem::list(&mut *conn, filter, page).await?;
    Ok(Json(books))
}

/// GET /genres/{genre_id}/books?skip=&limit=&search=
async fn list_genre_books(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<Vec<BookListItem>>> {
    let genre_id = parse_id(&genre_id)?;
    let page = params.page(&state)?;
    let filter = params.book_filter(Some(genre_id))?;

    let mut conn = state.db().acquire().await?;
    let books = BookListItem::list(&mut *conn, filter, page).await?;
    Ok(Json(books))
}
