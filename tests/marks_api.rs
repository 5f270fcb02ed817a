//! Integration tests for the favorites and watched HTTP surface.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, delete, get, post_json, send};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn healthcheck_reports_ok() {
    let (_dir, app) = build_test_app().await;
    let response = get(&app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn favorite_mark_list_unmark_round() {
    let (_dir, app) = build_test_app().await;

    let response = post_json(
        &app,
        "/favorites",
        json!({"external_id": 603, "category": "Movie", "title": "The Matrix"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"external_id": 603, "category": "Movie"}));

    let response = get(&app, "/favorites/movies").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{"external_id": 603, "category": "Movie", "title": "The Matrix", "poster_path": null}])
    );

    let response = delete(&app, "/favorites/Movie/603").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"removed": true}));

    let response = get(&app, "/favorites/movies").await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn repeated_post_returns_the_stored_mark() {
    let (_dir, app) = build_test_app().await;

    post_json(&app, "/watched", json!({"external_id": 42, "category": "Movie", "title": "Old"})).await;
    let response = post_json(
        &app,
        "/watched",
        json!({"external_id": 42, "category": "Series", "title": "New", "poster_path": "/x.jpg"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"external_id": 42, "category": "Movie"}));

    assert_eq!(body_json(get(&app, "/watched/series").await).await, json!([]));
    assert_eq!(
        body_json(get(&app, "/watched/movies").await).await,
        json!([{"external_id": 42, "category": "Movie", "title": "Old", "poster_path": null}])
    );
}

#[tokio::test]
async fn invalid_category_is_rejected_without_storing() {
    let (_dir, app) = build_test_app().await;

    let response = post_json(&app, "/favorites", json!({"external_id": 1, "category": "Documentary"})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"].is_string());

    assert_eq!(body_json(get(&app, "/favorites").await).await, json!([]));
}

#[tokio::test]
async fn malformed_bodies_are_validation_errors() {
    let (_dir, app) = build_test_app().await;

    let response = post_json(&app, "/favorites", json!({"external_id": "abc", "category": "Movie"})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_json(&app, "/favorites", json!({"category": "Movie"})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/favorites")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_with_wrong_category_is_not_found() {
    let (_dir, app) = build_test_app().await;
    post_json(&app, "/favorites", json!({"external_id": 42, "category": "Movie"})).await;

    let response = delete(&app, "/favorites/Series/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Not favorite"}));

    let response = delete(&app, "/favorites/Documentary/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(body_json(get(&app, "/favorites/movies").await).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_of_unknown_watched_mark_is_not_found() {
    let (_dir, app) = build_test_app().await;

    let response = delete(&app, "/watched/Movie/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Not watched"}));
}

#[tokio::test]
async fn list_all_is_newest_first_and_filterable() {
    let (_dir, app) = build_test_app().await;

    for (id, category) in [(1, "Movie"), (2, "Series"), (3, "Movie")] {
        post_json(&app, "/favorites", json!({"external_id": id, "category": category})).await;
    }

    let all = body_json(get(&app, "/favorites").await).await;
    let ids: Vec<i64> = all.as_array().unwrap().iter().map(|m| m["external_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let movies = body_json(get(&app, "/favorites?category=Movie").await).await;
    let ids: Vec<i64> = movies.as_array().unwrap().iter().map(|m| m["external_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 1]);

    let response = get(&app, "/favorites?category=Documentary").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn favorites_and_watched_are_independent() {
    let (_dir, app) = build_test_app().await;

    post_json(&app, "/favorites", json!({"external_id": 1399, "category": "Series"})).await;

    assert_eq!(body_json(get(&app, "/watched/series").await).await, json!([]));
    assert_eq!(delete(&app, "/watched/Series/1399").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, "/favorites/Series/1399").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn legacy_field_names_are_accepted() {
    let (_dir, app) = build_test_app().await;

    let response = post_json(&app, "/watched", json!({"tmdb_id": 1399, "kind": "Series", "poster_path": ""})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"external_id": 1399, "category": "Series"}));

    assert_eq!(
        body_json(get(&app, "/watched/series").await).await,
        json!([{"external_id": 1399, "category": "Series", "title": null, "poster_path": ""}])
    );
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let (_dir, app) = build_test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/favorites")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let (_dir, app) = build_test_app().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/favorites")
        .header("Origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn non_integer_path_id_is_rejected() {
    let (_dir, app) = build_test_app().await;

    let response = send(&app, Method::DELETE, "/favorites/Movie/abc", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
