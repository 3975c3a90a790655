use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use marketplace_core::{AppConfig, FileConfig, ServerDeps};
use marketplace_server::routes::build_router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn router() -> axum::Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://marketplace@localhost/unused")
        .unwrap();
    let deps = ServerDeps::new(pool, AppConfig::default(), Arc::new(FileConfig::default()));
    build_router(Arc::new(deps))
}

#[tokio::test]
async fn health_returns_ok() {
    let resp = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn graphql_post_on_configured_path() {
    let resp = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/graphql")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"{ getAllRoles }"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["getAllRoles"][0], "ADMIN");
}

#[tokio::test]
async fn graphiql_is_served() {
    let resp = router()
        .oneshot(Request::builder().uri("/graphiql").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
