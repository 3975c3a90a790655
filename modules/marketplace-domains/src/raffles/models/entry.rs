use chrono::{DateTime, Utc};
use marketplace_core::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::raffle::Raffle;
use crate::shared::RaffleResult;
use crate::stats;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaffleEntry {
    pub id: i32,
    pub user_id: i32,
    pub raffle_id: i32,
    #[sqlx(try_from = "String")]
    pub result: RaffleResult,
    pub created_at: DateTime<Utc>,
}

/// Outcome tally for one raffle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleStatistics {
    pub raffle_id: i32,
    pub total_entries: i64,
    pub won: i64,
    pub lost: i64,
    pub pending: i64,
}

impl RaffleStatistics {
    pub fn tally(raffle_id: i32, results: impl IntoIterator<Item = RaffleResult>) -> Self {
        let mut stats = Self {
            raffle_id,
            ..Self::default()
        };
        for result in results {
            stats.total_entries += 1;
            match result {
                RaffleResult::Won => stats.won += 1,
                RaffleResult::Lost => stats.lost += 1,
                RaffleResult::Pending => stats.pending += 1,
            }
        }
        stats
    }
}

impl RaffleEntry {
    pub async fn list_for_raffle(raffle_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM raffle_entries WHERE raffle_id = $1 ORDER BY created_at ASC",
        )
        .bind(raffle_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_for_raffles(raffle_ids: &[i32], pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM raffle_entries WHERE raffle_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(raffle_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM raffle_entries WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_for_raffle(raffle_id: i32, pool: &PgPool) -> QueryResult<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM raffle_entries WHERE raffle_id = $1")
            .bind(raffle_id)
            .fetch_one(pool)
            .await
            .map(|r| r.0)
            .map_err(Into::into)
    }

    pub async fn list_by_result(
        raffle_id: i32,
        result: RaffleResult,
        pool: &PgPool,
    ) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM raffle_entries
            WHERE raffle_id = $1 AND result = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(raffle_id)
        .bind(result.as_str())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_winners(raffle_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        Self::list_by_result(raffle_id, RaffleResult::Won, pool).await
    }

    pub async fn statistics(raffle_id: i32, pool: &PgPool) -> QueryResult<RaffleStatistics> {
        let entries = Self::list_for_raffle(raffle_id, pool).await?;
        Ok(RaffleStatistics::tally(raffle_id, entries.into_iter().map(|e| e.result)))
    }

    /// Share of a user's entries that won, in percent; 0 with no entries.
    pub async fn winning_percentage(user_id: i32, pool: &PgPool) -> QueryResult<f64> {
        let entries = Self::list_for_user(user_id, pool).await?;
        let won = entries.iter().filter(|e| e.result == RaffleResult::Won).count();
        Ok(stats::percentage(won, entries.len()))
    }

    /// A user's entry count relative to every raffle in the system, in
    /// percent; 0 when no raffles exist.
    pub async fn participation_rate(user_id: i32, pool: &PgPool) -> QueryResult<f64> {
        let (entries, raffles) = tokio::try_join!(
            async {
                sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM raffle_entries WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(pool)
                    .await
                    .map(|r| r.0)
                    .map_err(QueryError::from)
            },
            Raffle::count_all(pool),
        )?;
        Ok(stats::percentage(entries as usize, raffles as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_result() {
        use RaffleResult::*;
        let stats = RaffleStatistics::tally(42, [Won, Lost, Won, Pending]);
        assert_eq!(
            stats,
            RaffleStatistics {
                raffle_id: 42,
                total_entries: 4,
                won: 2,
                lost: 1,
                pending: 1,
            }
        );
    }

    #[test]
    fn tally_of_no_entries_is_zero() {
        let stats = RaffleStatistics::tally(7, []);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.won + stats.lost + stats.pending, 0);
    }
}
