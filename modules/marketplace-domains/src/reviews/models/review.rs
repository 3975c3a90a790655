use chrono::{DateTime, Utc};
use marketplace_core::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::reviews::feedback::FeedbackSummary;
use crate::reviews::sentiment::{classify, Sentiment};
use crate::shared::{DateRange, SortOrder};
use crate::stats;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub content: String,
    /// Rating in `[0, 100]`.
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub async fn list_for_product(
        product_id: i32,
        order: SortOrder,
        pool: &PgPool,
    ) -> QueryResult<Vec<Self>> {
        let sql = format!(
            "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at {}",
            order.sql()
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(product_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_for_products(product_ids: &[i32], pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM reviews WHERE product_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(product_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_by_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM reviews WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_between(range: DateRange, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM reviews WHERE created_at BETWEEN $1 AND $2")
            .bind(range.start())
            .bind(range.end())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Reviews rated at or above `min_percentage`.
    pub async fn list_above_percentage(min_percentage: f64, pool: &PgPool) -> QueryResult<Vec<Self>> {
        if !(0.0..=100.0).contains(&min_percentage) {
            return Err(QueryError::invalid(format!(
                "minPercentage must be within [0, 100], got {min_percentage}"
            )));
        }
        sqlx::query_as::<_, Self>("SELECT * FROM reviews WHERE percentage >= $1")
            .bind(min_percentage)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Mean review percentage for a product; 0 when it has no reviews.
    pub async fn average_rating(product_id: i32, pool: &PgPool) -> QueryResult<f64> {
        let rows = sqlx::query_as::<_, (f64,)>("SELECT percentage FROM reviews WHERE product_id = $1")
            .bind(product_id)
            .fetch_all(pool)
            .await?;
        let percentages: Vec<f64> = rows.into_iter().map(|(p,)| p).collect();
        Ok(stats::average(&percentages))
    }

    pub async fn feedback_summary(product_id: i32, pool: &PgPool) -> QueryResult<FeedbackSummary> {
        let reviews = Self::list_for_product(product_id, SortOrder::Desc, pool).await?;
        Ok(FeedbackSummary::from_reviews(&reviews))
    }

    pub async fn list_by_sentiment(
        product_id: i32,
        sentiment: Sentiment,
        pool: &PgPool,
    ) -> QueryResult<Vec<Self>> {
        let reviews = Self::list_for_product(product_id, SortOrder::Desc, pool).await?;
        Ok(reviews
            .into_iter()
            .filter(|r| classify(&r.content) == sentiment)
            .collect())
    }
}
