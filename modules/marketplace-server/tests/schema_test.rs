//! Schema-level tests. The pool is connected lazily and never used: every
//! query here is rejected or answered before reaching the store.

use std::sync::Arc;

use async_graphql::{Request, Value};
use marketplace_core::file_config::QueryConfig;
use marketplace_core::{AppConfig, FileConfig, ServerDeps};
use marketplace_server::graphql::{build_schema, AppSchema};
use sqlx::postgres::PgPoolOptions;

fn test_deps() -> Arc<ServerDeps> {
    deps_with(FileConfig::default())
}

fn deps_with(file_config: FileConfig) -> Arc<ServerDeps> {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://marketplace@localhost/unused")
        .unwrap();
    let config = AppConfig {
        database_url: String::new(),
        admin_phrase: Some("open-sesame".to_string()),
        moderator_phrase: Some("keep-order".to_string()),
    };
    Arc::new(ServerDeps::new(pool, config, Arc::new(file_config)))
}

fn schema() -> AppSchema {
    build_schema(test_deps())
}

fn first_error_message(resp: &async_graphql::Response) -> &str {
    resp.errors.first().map(|e| e.message.as_str()).unwrap_or_default()
}

fn first_error_code(resp: &async_graphql::Response) -> Option<Value> {
    resp.errors
        .first()
        .and_then(|e| e.extensions.as_ref())
        .and_then(|ext| ext.get("code").cloned())
}

#[tokio::test]
async fn inverted_date_range_is_bad_request() {
    let resp = schema()
        .execute(
            r#"{ getUsersByRegistrationDateRange(startDate: "2024-05-10T00:00:00Z", endDate: "2024-05-01T00:00:00Z") { id } }"#,
        )
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(first_error_code(&resp), Some(Value::from("BAD_REQUEST")));
}

#[tokio::test]
async fn inverted_sales_range_in_millis_is_bad_request() {
    let resp = schema()
        .execute("{ getSalesSummary(startDate: 1714521600000, endDate: 1714435200000) { saleCount } }")
        .await;
    assert_eq!(first_error_code(&resp), Some(Value::from("BAD_REQUEST")));
}

#[tokio::test]
async fn negative_limit_is_bad_request() {
    let resp = schema()
        .execute("{ getRecentUsers(limit: -1) { id } }")
        .await;
    assert_eq!(first_error_code(&resp), Some(Value::from("BAD_REQUEST")));
}

#[tokio::test]
async fn negative_threshold_is_bad_request() {
    let resp = schema()
        .execute("{ getProductsByRatingCount(minRatingCount: -2) { id } }")
        .await;
    assert_eq!(first_error_code(&resp), Some(Value::from("BAD_REQUEST")));
}

#[tokio::test]
async fn percentage_outside_bounds_is_bad_request() {
    let resp = schema()
        .execute("{ getReviewsAbovePercentage(minPercentage: 150) { id } }")
        .await;
    assert_eq!(first_error_code(&resp), Some(Value::from("BAD_REQUEST")));
}

// Scalar and enum coercion failures come from the executor, not from a
// resolver, so they carry no `code` extension. The message names the type.
#[tokio::test]
async fn non_integer_date_is_rejected() {
    let resp = schema()
        .execute(r#"{ getSalesByDateRange(startDate: "yesterday", endDate: 1714521600000) { id } }"#)
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert!(first_error_message(&resp).contains("\"Date\""), "{}", first_error_message(&resp));
    assert_eq!(first_error_code(&resp), None);
}

#[tokio::test]
async fn malformed_datetime_is_rejected() {
    let resp = schema()
        .execute(
            r#"{ getReviewsByDateRange(startDate: "not-a-date", endDate: "2024-05-01T00:00:00Z") { id } }"#,
        )
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert!(first_error_message(&resp).contains("\"DateTime\""), "{}", first_error_message(&resp));
    assert_eq!(first_error_code(&resp), None);
}

#[tokio::test]
async fn unknown_enum_value_is_rejected() {
    let resp = schema()
        .execute("{ getRafflesByStatus(status: PAUSED) { id } }")
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert!(first_error_message(&resp).contains("PAUSED"), "{}", first_error_message(&resp));
    assert_eq!(first_error_code(&resp), None);
}

// An inverted range is rejected before the store is touched, so reaching
// BAD_REQUEST shows both bounds parsed.
#[tokio::test]
async fn datetime_accepts_date_only_and_offsetless_input() {
    for (start, end) in [
        ("2024-05-02", "2024-05-01"),
        ("2024-05-01T12:00:00", "2024-05-01T06:00:00"),
        ("2024-05-01T12:00:00+02:00", "2024-05-01"),
    ] {
        let query = format!(
            r#"{{ getReviewsByDateRange(startDate: "{start}", endDate: "{end}") {{ id }} }}"#
        );
        let resp = schema().execute(query).await;
        assert_eq!(
            first_error_code(&resp),
            Some(Value::from("BAD_REQUEST")),
            "{start} .. {end}: {:?}",
            resp.errors
        );
    }
}

#[tokio::test]
async fn datetime_accepts_epoch_millis() {
    let resp = schema()
        .execute("{ getRafflesEndingBetween(startDate: 1714608000000, endDate: 1714521600000) { id } }")
        .await;
    assert_eq!(first_error_code(&resp), Some(Value::from("BAD_REQUEST")));
}

#[tokio::test]
async fn oversized_active_window_is_internal_not_panic() {
    let file_config = FileConfig {
        query: QueryConfig {
            active_window_days: i64::MAX,
            ..QueryConfig::default()
        },
        ..FileConfig::default()
    };
    let resp = build_schema(deps_with(file_config))
        .execute("{ getActiveUsers { id } }")
        .await;
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(first_error_code(&resp), Some(Value::from("INTERNAL")));
}

#[tokio::test]
async fn wrong_phrase_is_forbidden() {
    let request = Request::new(
        r#"mutation($input: CreateUserInput!) { createUser(input: $input) { id role } }"#,
    )
    .variables(async_graphql::Variables::from_json(serde_json::json!({
        "input": {
            "email": "eve@example.com",
            "username": "eve",
            "password": "hunter2",
            "phrase": "let-me-in"
        }
    })));
    let resp = schema().execute(request).await;
    assert_eq!(first_error_code(&resp), Some(Value::from("FORBIDDEN")));
}

#[tokio::test]
async fn all_roles_need_no_store() {
    let resp = schema().execute("{ getAllRoles }").await;
    assert!(resp.errors.is_empty());
    let data = resp.data.into_json().unwrap();
    assert_eq!(
        data["getAllRoles"],
        serde_json::json!(["ADMIN", "MODERATOR", "USER"])
    );
}

#[tokio::test]
async fn sdl_exposes_query_catalog() {
    let sdl = schema().sdl();
    for name in [
        "getUserById(id: Int!)",
        "getRaffleEntryCount(raffleId: Int!)",
        "getEntriesByResult(raffleId: Int!, result: RaffleResult!)",
        "getRafflesByType(type: RaffleType!)",
        "getSalesByDateRange(startDate: Date!, endDate: Date!)",
        "getProductFeedbackSummary",
        "getMostFavoritedProducts",
        "createUser(input: CreateUserInput!)",
        "scalar Date",
        "scalar DateTime",
        "scalar JSON",
    ] {
        assert!(sdl.contains(name), "SDL is missing {name}");
    }
    assert!(!sdl.contains("passwordHash"));
}
