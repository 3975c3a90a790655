use std::sync::Arc;

use async_graphql::*;
use marketplace_core::ServerDeps;
use marketplace_domains::users::{create_user, ElevationPhrases, NewUser};
use sqlx::PgPool;

use super::error::query_error;
use super::users::types::GqlUser;

#[derive(InputObject)]
pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    #[graphql(secret)]
    pub password: String,
    /// Elevation phrase for ADMIN or MODERATOR accounts.
    #[graphql(secret)]
    pub phrase: Option<String>,
}

#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    /// Create an account. A non-empty phrase that matches neither secret is rejected.
    async fn create_user(&self, ctx: &Context<'_>, input: CreateUserInput) -> Result<GqlUser> {
        tracing::info!(username = %input.username, "graphql.create_user");
        let pool = ctx.data_unchecked::<PgPool>();
        let deps = ctx.data_unchecked::<Arc<ServerDeps>>();

        let phrases = ElevationPhrases {
            admin: deps.config.admin_phrase.clone(),
            moderator: deps.config.moderator_phrase.clone(),
        };
        let new_user = NewUser {
            email: input.email,
            username: input.username,
            password: input.password,
            phrase: input.phrase,
        };

        let user = create_user(
            new_user,
            &phrases,
            deps.file_config.accounts.bcrypt_cost,
            pool,
        )
        .await
        .map_err(query_error)?;
        Ok(user.into())
    }
}
