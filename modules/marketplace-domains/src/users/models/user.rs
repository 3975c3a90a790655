use chrono::{DateTime, Utc};
use marketplace_core::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::{DateRange, Role};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub language_id: Option<i32>,
    pub last_active: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Number of users holding a role.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleCount {
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub count: i64,
}

impl User {
    pub async fn find_by_id(id: i32, pool: &PgPool) -> QueryResult<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| QueryError::not_found("user", id))
    }

    pub async fn find_by_ids(ids: &[i32], pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_all(pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Newest accounts first.
    pub async fn list_recent(limit: i64, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users ORDER BY created_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_registered_between(range: DateRange, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE created_at BETWEEN $1 AND $2")
            .bind(range.start())
            .bind(range.end())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_by_role(role: Role, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE role = $1")
            .bind(role.as_str())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_active_since(since: DateTime<Utc>, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE last_active >= $1")
            .bind(since)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Role of a user, or `None` when the user does not exist.
    pub async fn find_role(id: i32, pool: &PgPool) -> QueryResult<Option<Role>> {
        #[derive(sqlx::FromRow)]
        struct RoleOnly {
            #[sqlx(try_from = "String")]
            role: Role,
        }

        let row = sqlx::query_as::<_, RoleOnly>("SELECT role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.role))
    }

    pub async fn role_statistics(pool: &PgPool) -> QueryResult<Vec<RoleCount>> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count FROM users GROUP BY role ORDER BY role",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Users following `user_id`.
    pub async fn list_followers(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT u.*
            FROM user_follows f
            JOIN users u ON u.id = f.follower_id
            WHERE f.followed_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Users `user_id` follows.
    pub async fn list_following(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT u.*
            FROM user_follows f
            JOIN users u ON u.id = f.followed_id
            WHERE f.follower_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_followers(user_id: i32, pool: &PgPool) -> QueryResult<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM user_follows WHERE followed_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map(|r| r.0)
            .map_err(Into::into)
    }

    pub async fn count_following(user_id: i32, pool: &PgPool) -> QueryResult<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM user_follows WHERE follower_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map(|r| r.0)
            .map_err(Into::into)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl Language {
    /// Language set on a user's profile. Empty when the user has none or
    /// does not exist.
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT l.*
            FROM users u
            JOIN languages l ON l.id = u.language_id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
