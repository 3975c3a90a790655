//! Schema execution against a real store.
//! Requires a Postgres instance. Set DATABASE_TEST_URL or these tests are skipped.

use std::sync::Arc;

use async_graphql::{Request, Value, Variables};
use chrono::{DateTime, TimeZone, Utc};
use marketplace_core::file_config::AccountsConfig;
use marketplace_core::{AppConfig, FileConfig, ServerDeps};
use marketplace_server::graphql::{build_schema, AppSchema};
use serde_json::{json, Value as Json};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};

static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Get a schema over a migrated, empty test database, or skip if none is available.
async fn test_schema() -> Option<(AppSchema, PgPool, MutexGuard<'static, ()>)> {
    let url = std::env::var("DATABASE_TEST_URL").ok()?;
    let guard = DB_LOCK.lock().await;
    let pool = PgPool::connect(&url).await.ok()?;

    sqlx::migrate!("../../migrations").run(&pool).await.ok()?;
    sqlx::query("TRUNCATE users, languages, badges, achievements RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .ok()?;

    let config = AppConfig {
        database_url: url,
        admin_phrase: Some("open-sesame".to_string()),
        moderator_phrase: Some("keep-order".to_string()),
    };
    let file_config = FileConfig {
        accounts: AccountsConfig { bcrypt_cost: 4 },
        ..FileConfig::default()
    };
    let deps = Arc::new(ServerDeps::new(pool.clone(), config, Arc::new(file_config)));
    Some((build_schema(deps), pool, guard))
}

async fn run(schema: &AppSchema, request: impl Into<Request>) -> Json {
    let resp = schema.execute(request).await;
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    resp.data.into_json().unwrap()
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, d, 9, 30, 0).unwrap()
}

async fn insert_id(pool: &PgPool, sql: &str) -> i32 {
    sqlx::query_as::<_, (i32,)>(sql).fetch_one(pool).await.unwrap().0
}

async fn seed_user(pool: &PgPool, username: &str) -> i32 {
    insert_id(
        pool,
        &format!(
            "INSERT INTO users (email, username, password_hash) \
             VALUES ('{username}@example.com', '{username}', 'x') RETURNING id"
        ),
    )
    .await
}

async fn seed_product(pool: &PgPool, seller_id: i32, title: &str, sold_at: Option<DateTime<Utc>>) -> i32 {
    sqlx::query_as::<_, (i32,)>(
        "INSERT INTO products (seller_id, title, price, condition, sold_at) \
         VALUES ($1, $2, 25.0, 'BRAND_NEW', $3) RETURNING id",
    )
    .bind(seller_id)
    .bind(title)
    .bind(sold_at)
    .fetch_one(pool)
    .await
    .unwrap()
    .0
}

async fn seed_raffle(pool: &PgPool, product_id: i32, ends_at: DateTime<Utc>) -> i32 {
    sqlx::query_as::<_, (i32,)>(
        "INSERT INTO raffles (product_id, title, type, ends_at) VALUES ($1, 'drop', 'IN_APP', $2) RETURNING id",
    )
    .bind(product_id)
    .bind(ends_at)
    .fetch_one(pool)
    .await
    .unwrap()
    .0
}

async fn exec(pool: &PgPool, sql: &str) {
    sqlx::query(sql).execute(pool).await.unwrap();
}

fn ids(rows: &Json) -> Vec<i64> {
    let mut ids: Vec<i64> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    ids
}

// =========================================================================
// Relations
// =========================================================================

#[tokio::test]
async fn product_relations_resolve_through_loaders() {
    let Some((schema, pool, _guard)) = test_schema().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let buyer = seed_user(&pool, "buyer").await;
    let product = seed_product(&pool, seller, "jacket", None).await;
    exec(
        &pool,
        &format!(
            "INSERT INTO reviews (product_id, user_id, content, percentage) \
             VALUES ({product}, {buyer}, 'great fit', 90), ({product}, {buyer}, 'poor stitching', 20)"
        ),
    )
    .await;

    let data = run(
        &schema,
        format!(
            "{{ getProductById(id: {product}) {{ title seller {{ username }} reviews {{ percentage user {{ username }} product {{ id }} }} }} }}"
        ),
    )
    .await;

    let found = &data["getProductById"];
    assert_eq!(found["seller"]["username"], "seller");
    let reviews = found["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    for review in reviews {
        assert_eq!(review["user"]["username"], "buyer");
        assert_eq!(review["product"]["id"], product);
    }
}

#[tokio::test]
async fn raffle_and_sale_relations_resolve_through_loaders() {
    let Some((schema, pool, _guard)) = test_schema().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let product = seed_product(&pool, seller, "sneakers", None).await;
    let raffle = seed_raffle(&pool, product, day(10)).await;
    exec(
        &pool,
        &format!(
            "INSERT INTO raffle_entries (raffle_id, user_id, result) \
             VALUES ({raffle}, {alice}, 'WON'), ({raffle}, {bob}, 'LOST')"
        ),
    )
    .await;
    exec(
        &pool,
        &format!(
            "INSERT INTO sales (product_id, user_id, quantity, total_price) VALUES ({product}, {alice}, 1, 25.0)"
        ),
    )
    .await;

    let data = run(
        &schema,
        format!(
            "{{ getRaffleById(id: {raffle}) {{ type product {{ title }} entries {{ result user {{ username }} raffle {{ id }} }} }} \
               getProductSales(productId: {product}) {{ quantity product {{ title }} buyer {{ username }} }} }}"
        ),
    )
    .await;

    let found = &data["getRaffleById"];
    assert_eq!(found["type"], "IN_APP");
    assert_eq!(found["product"]["title"], "sneakers");
    let mut entrants: Vec<(String, String)> = found["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            assert_eq!(e["raffle"]["id"], raffle);
            (
                e["user"]["username"].as_str().unwrap().to_string(),
                e["result"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    entrants.sort();
    assert_eq!(
        entrants,
        vec![
            ("alice".to_string(), "WON".to_string()),
            ("bob".to_string(), "LOST".to_string())
        ]
    );

    let sales = data["getProductSales"].as_array().unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["buyer"]["username"], "alice");
    assert_eq!(sales[0]["product"]["title"], "sneakers");
}

// =========================================================================
// Account creation
// =========================================================================

fn create_user_request(email: &str, username: &str, phrase: Option<&str>) -> Request {
    Request::new("mutation($input: CreateUserInput!) { createUser(input: $input) { id email username role } }")
        .variables(Variables::from_json(json!({
            "input": {
                "email": email,
                "username": username,
                "password": "hunter2",
                "phrase": phrase,
            }
        })))
}

#[tokio::test]
async fn create_user_stores_hashed_password_and_role() {
    let Some((schema, pool, _guard)) = test_schema().await else {
        return;
    };
    let data = run(&schema, create_user_request("root@example.com", "root", Some("open-sesame"))).await;
    let created = &data["createUser"];
    assert_eq!(created["role"], "ADMIN");
    assert_eq!(created["email"], "root@example.com");

    let data = run(&schema, create_user_request("plain@example.com", "plain", None)).await;
    assert_eq!(data["createUser"]["role"], "USER");

    let id = created["id"].as_i64().unwrap() as i32;
    let (hash,) = sqlx::query_as::<_, (String,)>("SELECT password_hash FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(hash, "hunter2");
    assert!(bcrypt::verify("hunter2", &hash).unwrap());
}

#[tokio::test]
async fn duplicate_email_is_bad_request() {
    let Some((schema, _pool, _guard)) = test_schema().await else {
        return;
    };
    run(&schema, create_user_request("dup@example.com", "first", None)).await;

    let resp = schema
        .execute(create_user_request("dup@example.com", "second", None))
        .await;
    assert_eq!(resp.errors.len(), 1);
    let code = resp.errors[0]
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code").cloned());
    assert_eq!(code, Some(Value::from("BAD_REQUEST")));
}

// =========================================================================
// Rankings and flags
// =========================================================================

#[tokio::test]
async fn most_viewed_and_favorited_rank_by_count() {
    let Some((schema, pool, _guard)) = test_schema().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let a = seed_user(&pool, "a").await;
    let b = seed_user(&pool, "b").await;
    let c = seed_user(&pool, "c").await;
    let quiet = seed_product(&pool, seller, "quiet", None).await;
    let popular = seed_product(&pool, seller, "popular", None).await;
    let niche = seed_product(&pool, seller, "niche", None).await;
    let _unseen = seed_product(&pool, seller, "unseen", None).await;

    exec(
        &pool,
        &format!(
            "INSERT INTO product_views (user_id, product_id) VALUES \
             ({a}, {popular}), ({b}, {popular}), ({c}, {popular}), ({a}, {niche}), ({b}, {niche}), ({a}, {quiet})"
        ),
    )
    .await;
    exec(
        &pool,
        &format!(
            "INSERT INTO favorites (user_id, product_id) VALUES ({a}, {niche}), ({b}, {niche}), ({c}, {popular})"
        ),
    )
    .await;

    let data = run(
        &schema,
        "{ getMostViewedProducts(limit: 2) { count product { title } } \
           getMostFavoritedProducts(limit: 10) { count product { title } } }",
    )
    .await;

    assert_eq!(
        data["getMostViewedProducts"],
        json!([
            { "count": 3, "product": { "title": "popular" } },
            { "count": 2, "product": { "title": "niche" } },
        ])
    );
    assert_eq!(
        data["getMostFavoritedProducts"],
        json!([
            { "count": 2, "product": { "title": "niche" } },
            { "count": 1, "product": { "title": "popular" } },
        ])
    );
}

#[tokio::test]
async fn flag_count_and_flag_status_filters() {
    let Some((schema, pool, _guard)) = test_schema().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let reporter = seed_user(&pool, "reporter").await;
    let flagged = seed_product(&pool, seller, "flagged", None).await;
    let once = seed_product(&pool, seller, "once", None).await;
    let clean = seed_product(&pool, seller, "clean", None).await;
    exec(
        &pool,
        &format!(
            "INSERT INTO product_flags (product_id, user_id, reason, status) VALUES \
             ({flagged}, {reporter}, 'SPAM', 'OPEN'), \
             ({flagged}, {reporter}, 'COUNTERFEIT', 'DISMISSED'), \
             ({once}, {reporter}, 'OTHER', 'OPEN')"
        ),
    )
    .await;

    let data = run(
        &schema,
        format!(
            "{{ two: getProductsByFlagCount(minFlagCount: 2) {{ id }} \
               one: getProductsByFlagCount(minFlagCount: 1) {{ id }} \
               zero: getProductsByFlagCount(minFlagCount: 0) {{ id }} \
               all: getProductFlags(productId: {flagged}) {{ reason status }} \
               open: getProductFlags(productId: {flagged}, status: OPEN) {{ reason status }} }}"
        ),
    )
    .await;

    assert_eq!(ids(&data["two"]), vec![flagged as i64]);
    assert_eq!(ids(&data["one"]), vec![flagged as i64, once as i64]);
    assert_eq!(ids(&data["zero"]), vec![flagged as i64, once as i64, clean as i64]);
    assert_eq!(data["all"].as_array().unwrap().len(), 2);
    assert_eq!(data["open"], json!([{ "reason": "SPAM", "status": "OPEN" }]));
}

// =========================================================================
// Inclusive date bounds
// =========================================================================

#[tokio::test]
async fn ending_and_sold_ranges_include_both_bounds() {
    let Some((schema, pool, _guard)) = test_schema().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let before = seed_product(&pool, seller, "before", Some(day(1))).await;
    let at_start = seed_product(&pool, seller, "at_start", Some(day(5))).await;
    let at_end = seed_product(&pool, seller, "at_end", Some(day(9))).await;
    let _unsold = seed_product(&pool, seller, "unsold", None).await;

    seed_raffle(&pool, before, day(1)).await;
    let starts = seed_raffle(&pool, before, day(5)).await;
    let ends = seed_raffle(&pool, before, day(9)).await;
    seed_raffle(&pool, before, day(12)).await;

    let start = day(5).to_rfc3339();
    let end = day(9).to_rfc3339();
    let data = run(
        &schema,
        format!(
            r#"{{ raffles: getRafflesEndingBetween(startDate: "{start}", endDate: "{end}") {{ id endsAt }}
                 sold: getProductsSoldBetween(startDate: "{start}", endDate: "{end}") {{ id soldAt }} }}"#
        ),
    )
    .await;

    assert_eq!(ids(&data["raffles"]), vec![starts as i64, ends as i64]);
    assert_eq!(ids(&data["sold"]), vec![at_start as i64, at_end as i64]);
    let ends_at: Vec<&str> = data["raffles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["endsAt"].as_str().unwrap())
        .collect();
    assert!(ends_at.contains(&"2024-05-05T09:30:00.000Z"));
}
