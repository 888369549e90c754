#![allow(clippy::unwrap_used, clippy::expect_used)]
//! HTTP surface tests.
//!
//! Argument validation runs before any storage access, so those cases are
//! exercised against a pool that cannot connect. Listing round trips use a
//! real schema when `DATABASE_URL` is set.

mod common;

use axum::http::StatusCode;
use libris_catalog::{AppState, QueryLimits};
use libris_test_utils::{test_author, test_book, test_genre};

// -------------------------------------------------------------------------
// Without storage
// -------------------------------------------------------------------------

#[tokio::test]
async fn malformed_genre_id_is_bad_request() {
    for uri in [
        "/genres/children/not-a-uuid",
        "/genres/parents/not-a-uuid",
        "/genres/descendants/42",
        "/genres/not-a-uuid/books",
    ] {
        let response = common::get(common::unreachable_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn negative_limit_is_bad_request() {
    let response = common::get(common::unreachable_app(), "/books?limit=-1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_string(response).await;
    assert!(body.contains("limit"), "{body}");
}

#[tokio::test]
async fn nul_in_search_is_bad_request() {
    for uri in [
        "/books?search=%00",
        "/books?search=harry%00potter",
        "/genres/0190c1d4-8a53-7000-8000-000000000001/books?search=%00",
    ] {
        let response = common::get(common::unreachable_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body = common::body_string(response).await;
        assert!(body.contains("NUL"), "{body}");
    }
}

#[tokio::test]
async fn non_numeric_skip_is_rejected() {
    let response = common::get(common::unreachable_app(), "/genres/base?skip=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_storage_is_service_unavailable() {
    for uri in [
        "/books",
        "/genres/base",
        "/genres/parents/0190c1d4-8a53-7000-8000-000000000001",
    ] {
        let response = common::get(common::unreachable_app(), uri).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");

        // Driver details are not exposed.
        let body = common::body_string(response).await;
        assert_eq!(body, "storage unavailable");
    }
}

#[tokio::test]
async fn health_reports_unhealthy_storage() {
    let response = common::get(common::unreachable_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = common::body_json(response).await;
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["postgres"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = common::get(common::unreachable_app(), "/authors").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -------------------------------------------------------------------------
// With storage
// -------------------------------------------------------------------------

#[tokio::test]
async fn books_endpoint_returns_aggregated_rows() {
    let Some(db) = common::test_db().await else {
        return;
    };

    let author = test_author("Ursula", "Le Guin")
        .insert(&db.pool)
        .await
        .unwrap();
    let genre = test_genre("Fantasy").insert(&db.pool).await.unwrap();
    let book = test_book("A Wizard of Earthsea", "1968-01-01")
        .with_image("covers/earthsea.jpg")
        .with_author(author.id)
        .with_genre(genre.id)
        .insert(&db.pool)
        .await
        .unwrap();

    let state = AppState::with_pool(db.pool.clone(), QueryLimits::default());

    let response = common::get(common::app(state.clone()), "/books?search=WIZARD").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], book.id.to_string());
    assert_eq!(rows[0]["released_date"], "1968-01-01");
    assert_eq!(rows[0]["image"], "covers/earthsea.jpg");
    assert_eq!(rows[0]["authors"][0]["fullname"], "Ursula Le Guin");
    assert_eq!(rows[0]["genres"][0]["title"], "Fantasy");

    let uri = format!("/genres/{}/books?skip=1", genre.id);
    let response = common::get(common::app(state), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, serde_json::json!([]));

    db.cleanup().await.unwrap();
}

#[tokio::test]
async fn genre_endpoints_walk_the_forest() {
    let Some(db) = common::test_db().await else {
        return;
    };

    let root = test_genre("Fiction").insert(&db.pool).await.unwrap();
    let mid = test_genre("Fantasy")
        .with_parent(root.id)
        .insert(&db.pool)
        .await
        .unwrap();
    let leaf = test_genre("High Fantasy")
        .with_parent(mid.id)
        .insert(&db.pool)
        .await
        .unwrap();

    let state = AppState::with_pool(db.pool.clone(), QueryLimits::default());

    let response = common::get(common::app(state.clone()), "/genres/base").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Fiction");
    assert!(json[0]["parent_id"].is_null());

    let uri = format!("/genres/children/{}", root.id);
    let json = common::body_json(common::get(common::app(state.clone()), &uri).await).await;
    assert_eq!(json[0]["id"], mid.id.to_string());

    let uri = format!("/genres/parents/{}", leaf.id);
    let json = common::body_json(common::get(common::app(state.clone()), &uri).await).await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Fantasy", "Fiction"]);

    let uri = format!("/genres/descendants/{}", root.id);
    let json = common::body_json(common::get(common::app(state), &uri).await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    db.cleanup().await.unwrap();
}

#[tokio::test]
async fn health_reports_healthy_storage() {
    let Some(db) = common::test_db().await else {
        return;
    };

    let state = AppState::with_pool(db.pool.clone(), QueryLimits::default());
    let response = common::get(common::app(state), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["status"], "healthy");

    db.cleanup().await.unwrap();
}
