pub mod types;

use std::sync::Arc;

use async_graphql::*;
use chrono::{Duration, Utc};
use marketplace_core::{QueryError, ServerDeps};
use marketplace_domains::products::Product;
use marketplace_domains::reviews::Review;
use marketplace_domains::shared::Role;
use marketplace_domains::users::{
    Language, Message, MessageReaction, Notification, SavedSearch, SearchHistory, User,
    UserAchievement, UserActivity, UserBadge, UserRating,
};
use sqlx::PgPool;
use types::*;

use super::args::{bounded_limit, date_range};
use super::enums::GqlRole;
use super::error::query_error;
use super::products::types::GqlProduct;
use super::reviews::types::GqlReview;
use super::scalars::Timestamp;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn get_user_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<GqlUser> {
        tracing::info!(id, "graphql.get_user_by_id");
        let pool = ctx.data_unchecked::<PgPool>();
        let user = User::find_by_id(id, pool).await.map_err(query_error)?;
        Ok(user.into())
    }

    async fn get_all_users(&self, ctx: &Context<'_>) -> Result<Vec<GqlUser>> {
        tracing::info!("graphql.get_all_users");
        let pool = ctx.data_unchecked::<PgPool>();
        let users = User::list_all(pool).await.map_err(query_error)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    /// Newest accounts first.
    async fn get_recent_users(&self, ctx: &Context<'_>, limit: i32) -> Result<Vec<GqlUser>> {
        tracing::info!(limit, "graphql.get_recent_users");
        let pool = ctx.data_unchecked::<PgPool>();
        let limit = bounded_limit(ctx, limit)?;
        let users = User::list_recent(limit, pool).await.map_err(query_error)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    /// Accounts created within `[startDate, endDate]`.
    async fn get_users_by_registration_date_range(
        &self,
        ctx: &Context<'_>,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<Vec<GqlUser>> {
        tracing::info!(start_date = %start_date.0, end_date = %end_date.0, "graphql.get_users_by_registration_date_range");
        let pool = ctx.data_unchecked::<PgPool>();
        let range = date_range(start_date, end_date)?;
        let users = User::list_registered_between(range, pool)
            .await
            .map_err(query_error)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    async fn get_user_favorites(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlProduct>> {
        tracing::info!(user_id, "graphql.get_user_favorites");
        let pool = ctx.data_unchecked::<PgPool>();
        let products = Product::list_favorited_by(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_user_viewed_products(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(user_id, "graphql.get_user_viewed_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let products = Product::list_viewed_by(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_user_search_history(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlSearchHistory>> {
        tracing::info!(user_id, "graphql.get_user_search_history");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = SearchHistory::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlSearchHistory::from).collect())
    }

    async fn get_user_saved_searches(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlSavedSearch>> {
        tracing::info!(user_id, "graphql.get_user_saved_searches");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = SavedSearch::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlSavedSearch::from).collect())
    }

    async fn get_user_sent_messages(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlMessage>> {
        tracing::info!(user_id, "graphql.get_user_sent_messages");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = Message::list_sent_by(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlMessage::from).collect())
    }

    async fn get_user_received_messages(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlMessage>> {
        tracing::info!(user_id, "graphql.get_user_received_messages");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = Message::list_received_by(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlMessage::from).collect())
    }

    async fn get_message_reactions(
        &self,
        ctx: &Context<'_>,
        message_id: i32,
    ) -> Result<Vec<GqlMessageReaction>> {
        tracing::info!(message_id, "graphql.get_message_reactions");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = MessageReaction::list_for_message(message_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlMessageReaction::from).collect())
    }

    async fn get_user_product_count(&self, ctx: &Context<'_>, user_id: i32) -> Result<i64> {
        tracing::info!(user_id, "graphql.get_user_product_count");
        let pool = ctx.data_unchecked::<PgPool>();
        Product::count_by_seller(user_id, pool)
            .await
            .map_err(query_error)
    }

    async fn get_user_follower_count(&self, ctx: &Context<'_>, user_id: i32) -> Result<i64> {
        tracing::info!(user_id, "graphql.get_user_follower_count");
        let pool = ctx.data_unchecked::<PgPool>();
        User::count_followers(user_id, pool)
            .await
            .map_err(query_error)
    }

    async fn get_user_following_count(&self, ctx: &Context<'_>, user_id: i32) -> Result<i64> {
        tracing::info!(user_id, "graphql.get_user_following_count");
        let pool = ctx.data_unchecked::<PgPool>();
        User::count_following(user_id, pool)
            .await
            .map_err(query_error)
    }

    async fn get_user_activity_count(&self, ctx: &Context<'_>, user_id: i32) -> Result<i64> {
        tracing::info!(user_id, "graphql.get_user_activity_count");
        let pool = ctx.data_unchecked::<PgPool>();
        UserActivity::count_for_user(user_id, pool)
            .await
            .map_err(query_error)
    }

    /// Users following `userId`.
    async fn get_user_followers(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlUser>> {
        tracing::info!(user_id, "graphql.get_user_followers");
        let pool = ctx.data_unchecked::<PgPool>();
        let users = User::list_followers(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    /// Users `userId` follows.
    async fn get_user_following(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlUser>> {
        tracing::info!(user_id, "graphql.get_user_following");
        let pool = ctx.data_unchecked::<PgPool>();
        let users = User::list_following(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    async fn get_admin_users(&self, ctx: &Context<'_>) -> Result<Vec<GqlUser>> {
        tracing::info!("graphql.get_admin_users");
        users_with_role(ctx, Role::Admin).await
    }

    async fn get_moderator_users(&self, ctx: &Context<'_>) -> Result<Vec<GqlUser>> {
        tracing::info!("graphql.get_moderator_users");
        users_with_role(ctx, Role::Moderator).await
    }

    async fn get_regular_users(&self, ctx: &Context<'_>) -> Result<Vec<GqlUser>> {
        tracing::info!("graphql.get_regular_users");
        users_with_role(ctx, Role::User).await
    }

    async fn get_users_by_role(&self, ctx: &Context<'_>, role: GqlRole) -> Result<Vec<GqlUser>> {
        tracing::info!(role = ?role, "graphql.get_users_by_role");
        users_with_role(ctx, role.into()).await
    }

    /// Role held by a user; empty when the user does not exist.
    async fn get_user_roles(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlRole>> {
        tracing::info!(user_id, "graphql.get_user_roles");
        let pool = ctx.data_unchecked::<PgPool>();
        let role = User::find_role(user_id, pool).await.map_err(query_error)?;
        Ok(role.into_iter().map(GqlRole::from).collect())
    }

    async fn get_all_roles(&self) -> Vec<GqlRole> {
        tracing::info!("graphql.get_all_roles");
        Role::ALL.iter().copied().map(GqlRole::from).collect()
    }

    /// Users active within the configured window (`[query] active_window_days`).
    async fn get_active_users(&self, ctx: &Context<'_>) -> Result<Vec<GqlUser>> {
        let deps = ctx.data_unchecked::<Arc<ServerDeps>>();
        let window_days = deps.file_config.query.active_window_days;
        tracing::info!(window_days, "graphql.get_active_users");

        let pool = ctx.data_unchecked::<PgPool>();
        let since = Duration::try_days(window_days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| {
                query_error(QueryError::Internal(format!(
                    "active window of {window_days} days is out of range"
                )))
            })?;
        let users = User::list_active_since(since, pool)
            .await
            .map_err(query_error)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    async fn get_user_role_statistics(&self, ctx: &Context<'_>) -> Result<Vec<GqlRoleCount>> {
        tracing::info!("graphql.get_user_role_statistics");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = User::role_statistics(pool).await.map_err(query_error)?;
        Ok(rows.into_iter().map(GqlRoleCount::from).collect())
    }

    async fn get_user_badges(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlUserBadge>> {
        tracing::info!(user_id, "graphql.get_user_badges");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = UserBadge::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlUserBadge::from).collect())
    }

    async fn get_user_achievements(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlUserAchievement>> {
        tracing::info!(user_id, "graphql.get_user_achievements");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = UserAchievement::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlUserAchievement::from).collect())
    }

    async fn get_user_notifications(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlNotification>> {
        tracing::info!(user_id, "graphql.get_user_notifications");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = Notification::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlNotification::from).collect())
    }

    async fn get_user_unread_notifications(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlNotification>> {
        tracing::info!(user_id, "graphql.get_user_unread_notifications");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = Notification::list_unread_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlNotification::from).collect())
    }

    /// Zero or one languages.
    async fn get_user_language(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlLanguage>> {
        tracing::info!(user_id, "graphql.get_user_language");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = Language::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlLanguage::from).collect())
    }

    async fn get_user_profile_info(&self, ctx: &Context<'_>, user_id: i32) -> Result<GqlUser> {
        tracing::info!(user_id, "graphql.get_user_profile_info");
        let pool = ctx.data_unchecked::<PgPool>();
        let user = User::find_by_id(user_id, pool).await.map_err(query_error)?;
        Ok(user.into())
    }

    /// Ratings the user gave or received.
    async fn get_user_ratings(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlUserRating>> {
        tracing::info!(user_id, "graphql.get_user_ratings");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = UserRating::list_involving(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlUserRating::from).collect())
    }

    async fn get_user_ratings_given(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlUserRating>> {
        tracing::info!(user_id, "graphql.get_user_ratings_given");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = UserRating::list_given(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlUserRating::from).collect())
    }

    async fn get_user_ratings_received(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlUserRating>> {
        tracing::info!(user_id, "graphql.get_user_ratings_received");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = UserRating::list_received(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlUserRating::from).collect())
    }

    async fn get_user_activity_log(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlUserActivity>> {
        tracing::info!(user_id, "graphql.get_user_activity_log");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = UserActivity::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlUserActivity::from).collect())
    }

    async fn get_user_products(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlProduct>> {
        tracing::info!(user_id, "graphql.get_user_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let products = Product::list_by_seller(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_user_reviews(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlReview>> {
        tracing::info!(user_id, "graphql.get_user_reviews");
        let pool = ctx.data_unchecked::<PgPool>();
        let reviews = Review::list_by_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(reviews.into_iter().map(GqlReview::from).collect())
    }
}

async fn users_with_role(ctx: &Context<'_>, role: Role) -> Result<Vec<GqlUser>> {
    let pool = ctx.data_unchecked::<PgPool>();
    let users = User::list_by_role(role, pool).await.map_err(query_error)?;
    Ok(users.into_iter().map(GqlUser::from).collect())
}
