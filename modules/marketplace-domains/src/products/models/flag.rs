use chrono::{DateTime, Utc};
use marketplace_core::QueryResult;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::{ProductFlagReason, ProductFlagStatus};

/// A user report against a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductFlag {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    #[sqlx(try_from = "String")]
    pub reason: ProductFlagReason,
    #[sqlx(try_from = "String")]
    pub status: ProductFlagStatus,
    pub created_at: DateTime<Utc>,
}

impl ProductFlag {
    /// Flags on a product, optionally restricted to one status, newest first.
    pub async fn list_for_product(
        product_id: i32,
        status: Option<ProductFlagStatus>,
        pool: &PgPool,
    ) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM product_flags
            WHERE product_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
