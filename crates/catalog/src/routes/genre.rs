//! Genre hierarchy routes.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;

use crate::catalog::GenreDirection;
use crate::error::CatalogResult;
use crate::models::{Genre, parse_id};
use crate::routes::helpers::ListParams;
use crate::state::AppState;

/// Create the genre router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres/base", get(list_base))
        .route("/genres/children/{genre_id}", get(list_children))
        .route("/genres/parents/{genre_id}", get(list_ancestors))
        .route("/genres/descendants/{genre_id}", get(list_descendants))
}

/// GET /genres/base?skip=&limit=
async fn list_base(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<Vec<Genre>>> {
    let page = params.page(&state)?;

    let mut conn = state.db().acquire().await?;
    let genres = Genre::list_base(&mut *conn, page).await?;
    Ok(Json(genres))
}

/// GET /genres/children/{genre_id}?skip=&limit=
async fn list_children(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<Vec<Genre>>> {
    let genre_id = parse_id(&genre_id)?;
    let page = params.page(&state)?;

    let mut conn = state.db().acquire().await?;
    let genres = Genre::list_children(&mut *conn, genre_id, page).await?;
    Ok(Json(genres))
}

/// GET /genres/parents/{genre_id}
async fn list_ancestors(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> CatalogResult<Json<Vec<Genre>>> {
    related(&state, &genre_id, GenreDirection::Ancestors).await
}

/// GET /genres/descendants/{genre_id}
async fn list_descendants(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> CatalogResult<Json<Vec<Genre>>> {
    related(&state, &genre_id, GenreDirection::Descendants).await
}

async fn related(
    state: &AppState,
    raw_id: &str,
    direction: GenreDirection,
) -> CatalogResult<Json<Vec<Genre>>> {
    let genre_id = parse_id(raw_id)?;

    let mut conn = state.db().acquire().await?;
    let genres = Genre::list_related(
        &mut *conn,
        genre_id,
        direction,
        state.limits().max_genre_depth,
    )
    .await?;
    Ok(Json(genres))
}
