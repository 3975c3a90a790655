use chrono::{DateTime, Utc};
use marketplace_core::QueryResult;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// One user rating another.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRating {
    pub id: i32,
    pub rater_id: i32,
    pub rated_id: i32,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl UserRating {
    /// Ratings the user gave or received.
    pub async fn list_involving(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM user_ratings WHERE rater_id = $1 OR rated_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_given(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_ratings WHERE rater_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_received(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_ratings WHERE rated_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserActivity {
    pub id: i32,
    pub user_id: i32,
    pub action: i32,
    pub created_at: DateTime<Utc>,
}

impl UserActivity {
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_activities WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count_for_user(user_id: i32, pool: &PgPool) -> QueryResult<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM user_activities WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map(|r| r.0)
            .map_err(Into::into)
    }
}
