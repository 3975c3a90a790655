use chrono::{DateTime, Utc};
use marketplace_core::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::{DateRange, RaffleStatus, RaffleType};
use crate::stats;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Raffle {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type", try_from = "String")]
    pub raffle_type: RaffleType,
    #[sqlx(try_from = "String")]
    pub status: RaffleStatus,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Raffle {
    pub async fn find_by_id(id: i32, pool: &PgPool) -> QueryResult<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM raffles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| QueryError::not_found("raffle", id))
    }

    pub async fn find_by_ids(ids: &[i32], pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM raffles WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_by_status(status: RaffleStatus, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM raffles WHERE status = $1 ORDER BY ends_at ASC")
            .bind(status.as_str())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_by_type(raffle_type: RaffleType, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM raffles WHERE type = $1 ORDER BY ends_at ASC")
            .bind(raffle_type.as_str())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_ending_between(range: DateRange, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM raffles WHERE ends_at BETWEEN $1 AND $2 ORDER BY ends_at ASC",
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_all(pool: &PgPool) -> QueryResult<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM raffles")
            .fetch_one(pool)
            .await
            .map(|r| r.0)
            .map_err(Into::into)
    }

    /// Raffles with at least `min_count` entries, counted in memory.
    pub async fn list_by_entry_count(min_count: usize, pool: &PgPool) -> QueryResult<Vec<Self>> {
        let (raffles, entry_raffle_ids) = tokio::try_join!(
            async {
                sqlx::query_as::<_, Self>("SELECT * FROM raffles")
                    .fetch_all(pool)
                    .await
                    .map_err(QueryError::from)
            },
            async {
                sqlx::query_as::<_, (i32,)>("SELECT raffle_id FROM raffle_entries")
                    .fetch_all(pool)
                    .await
                    .map_err(QueryError::from)
            },
        )?;
        let counts = stats::count_by(entry_raffle_ids.into_iter().map(|(id,)| id));
        Ok(stats::retain_min_count(raffles, &counts, min_count, |r| r.id))
    }
}
