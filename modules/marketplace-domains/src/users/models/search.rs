use chrono::{DateTime, Utc};
use marketplace_core::QueryResult;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SearchHistory {
    pub id: i32,
    pub user_id: i32,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl SearchHistory {
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM search_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

/// A stored search with arbitrary structured filters.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedSearch {
    pub id: i32,
    pub user_id: i32,
    pub query: String,
    pub filters: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl SavedSearch {
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM saved_searches WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
