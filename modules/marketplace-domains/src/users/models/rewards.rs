use chrono::{DateTime, Utc};
use marketplace_core::QueryResult;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A badge a user earned, joined with the badge definition.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserBadge {
    pub id: i32,
    pub user_id: i32,
    pub badge_id: i32,
    pub created_at: DateTime<Utc>,
    pub badge_name: String,
    pub badge_description: String,
}

impl UserBadge {
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT ub.id, ub.user_id, ub.badge_id, ub.created_at,
                   b.name AS badge_name, b.description AS badge_description
            FROM user_badges ub
            JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

/// An achievement a user unlocked, joined with the achievement definition.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserAchievement {
    pub id: i32,
    pub user_id: i32,
    pub achievement_id: i32,
    pub created_at: DateTime<Utc>,
    pub achievement_name: String,
    pub achievement_description: String,
    pub criteria: serde_json::Value,
}

impl UserAchievement {
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT ua.id, ua.user_id, ua.achievement_id, ua.created_at,
                   a.name AS achievement_name, a.description AS achievement_description,
                   a.criteria
            FROM user_achievements ua
            JOIN achievements a ON a.id = ua.achievement_id
            WHERE ua.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
