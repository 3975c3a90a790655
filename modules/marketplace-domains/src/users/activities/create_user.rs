use marketplace_core::{QueryError, QueryResult};
use sqlx::PgPool;

use crate::shared::Role;
use crate::users::User;

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub phrase: Option<String>,
}

/// Server-side secrets that elevate a new account.
#[derive(Debug, Clone, Default)]
pub struct ElevationPhrases {
    pub admin: Option<String>,
    pub moderator: Option<String>,
}

impl ElevationPhrases {
    /// An absent or empty phrase yields USER. A non-empty phrase must match
    /// one of the configured secrets; anything else is rejected rather than
    /// downgraded to USER.
    pub fn resolve_role(&self, phrase: Option<&str>) -> QueryResult<Role> {
        let Some(phrase) = phrase.filter(|p| !p.is_empty()) else {
            return Ok(Role::User);
        };
        if self.admin.as_deref() == Some(phrase) {
            return Ok(Role::Admin);
        }
        if self.moderator.as_deref() == Some(phrase) {
            return Ok(Role::Moderator);
        }
        Err(QueryError::PolicyViolation(
            "invalid phrase for admin or moderator role".to_string(),
        ))
    }
}

/// Create an account. The phrase is checked before anything is written.
pub async fn create_user(
    input: NewUser,
    phrases: &ElevationPhrases,
    bcrypt_cost: u32,
    pool: &PgPool,
) -> QueryResult<User> {
    let role = phrases.resolve_role(input.phrase.as_deref())?;

    if input.email.is_empty() || input.username.is_empty() || input.password.is_empty() {
        return Err(QueryError::invalid(
            "email, username, and password are required",
        ));
    }

    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt_cost))
        .await
        .map_err(|e| QueryError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| QueryError::Internal(format!("password hashing failed: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, username, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&input.email)
    .bind(&input.username)
    .bind(&password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            QueryError::invalid("email or username is already in use")
        }
        other => QueryError::DataAccess(other),
    })?;

    tracing::info!(user_id = user.id, role = %user.role, "user.created");
    Ok(user)
}
