use chrono::{DateTime, Utc};
use marketplace_core::QueryResult;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::ReactionType;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_unread_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub async fn list_sent_by(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM messages WHERE sender_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_received_by(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM messages WHERE receiver_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageReaction {
    pub id: i32,
    pub message_id: i32,
    pub user_id: i32,
    #[sqlx(rename = "type", try_from = "String")]
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl MessageReaction {
    pub async fn list_for_message(message_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM message_reactions WHERE message_id = $1")
            .bind(message_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
