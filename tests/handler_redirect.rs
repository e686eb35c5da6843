mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use tinylink::routes::router;

#[tokio::test]
async fn test_redirect_success_records_click() {
    let (state, repo) = common::create_memory_state();
    let server = TestServer::new(router(state)).unwrap();

    server
        .post("/links")
        .json(&json!({ "targetUrl": "https://example.com/target", "code": "redir1" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");

    let link = repo.get("redir1").unwrap();
    assert_eq!(link.clicks, 1);
    assert!(link.last_clicked.is_some());
}

#[tokio::test]
async fn test_redirect_counts_every_hit() {
    let (state, repo) = common::create_memory_state();
    let server = TestServer::new(router(state)).unwrap();

    server
        .post("/links")
        .json(&json!({ "targetUrl": "https://example.com", "code": "count1" }))
        .await
        .assert_status(StatusCode::CREATED);

    for _ in 0..3 {
        assert_eq!(
            server.get("/count1").await.status_code(),
            StatusCode::TEMPORARY_REDIRECT
        );
    }

    let response = server.get("/links/count1").await;
    assert_eq!(response.json::<serde_json::Value>()["clicks"], 3);
    assert_eq!(repo.get("count1").unwrap().clicks, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repo) = common::create_memory_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_after_delete_not_found() {
    let (state, _repo) = common::create_memory_state();
    let server = TestServer::new(router(state)).unwrap();

    server
        .post("/links")
        .json(&json!({ "targetUrl": "https://example.com", "code": "temp01" }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete("/links/temp01")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get("/temp01").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_against_postgres(pool: PgPool) {
    let server = TestServer::new(router(common::create_pg_state(pool.clone()))).unwrap();

    common::create_test_link(&pool, "pgredir", "https://example.com/pg").await;

    let response = server.get("/pgredir").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/pg");

    let (clicks, last_clicked) = common::fetch_clicks(&pool, "pgredir").await;
    assert_eq!(clicks, 1);
    assert!(last_clicked.is_some());
}

#[tokio::test]
async fn test_redirect_to_url_with_control_characters() {
    let (state, repo) = common::create_memory_state();
    let server = TestServer::new(router(state)).unwrap();

    let created = server
        .post("/links")
        .json(&json!({ "targetUrl": "https://example.com/a\nb", "code": "ctrl01" }))
        .await;

    created.assert_status(StatusCode::CREATED);
    assert_eq!(
        created.json::<serde_json::Value>()["targetUrl"],
        "https://example.com/ab"
    );

    let response = server.get("/ctrl01").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/ab");
    assert_eq!(repo.get("ctrl01").unwrap().clicks, 1);
}

#[tokio::test]
async fn test_redirect_store_failure_is_not_found() {
    let (state, repo) = common::create_failing_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/ABC123").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "ABC123");
    assert_eq!(repo.calls(), 1);
}

#[tokio::test]
async fn test_redirect_malformed_code_skips_store() {
    let (state, repo) = common::create_failing_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/abc%00de").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_redirect_undecodable_path_is_json_not_found() {
    let (state, repo) = common::create_failing_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/%FF").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
    assert_eq!(repo.calls(), 0);
}

#[sqlx::test]
async fn test_nul_in_code_against_postgres_is_not_found(pool: PgPool) {
    let server = TestServer::new(router(common::create_pg_state(pool))).unwrap();

    server.get("/abc%00de").await.assert_status_not_found();
    server.get("/links/abc%00de").await.assert_status_not_found();
    server
        .delete("/links/abc%00de")
        .await
        .assert_status_not_found();
}
