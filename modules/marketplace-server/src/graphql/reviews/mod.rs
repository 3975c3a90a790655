pub mod types;

use async_graphql::*;
use marketplace_domains::reviews::Review;
use sqlx::PgPool;
use types::*;

use super::args::date_range;
use super::enums::{GqlSentiment, GqlSortOrder};
use super::error::query_error;
use super::scalars::Timestamp;

#[derive(Default)]
pub struct ReviewQuery;

#[Object]
impl ReviewQuery {
    async fn get_product_reviews(
        &self,
        ctx: &Context<'_>,
        product_id: i32,
        order: Option<GqlSortOrder>,
    ) -> Result<Vec<GqlReview>> {
        tracing::info!(product_id, order = ?order, "graphql.get_product_reviews");
        let pool = ctx.data_unchecked::<PgPool>();
        let reviews = Review::list_for_product(
            product_id,
            order.map(Into::into).unwrap_or_default(),
            pool,
        )
        .await
        .map_err(query_error)?;
        Ok(reviews.into_iter().map(GqlReview::from).collect())
    }

    async fn get_reviews_by_date_range(
        &self,
        ctx: &Context<'_>,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<Vec<GqlReview>> {
        tracing::info!(start_date = %start_date.0, end_date = %end_date.0, "graphql.get_reviews_by_date_range");
        let pool = ctx.data_unchecked::<PgPool>();
        let range = date_range(start_date, end_date)?;
        let reviews = Review::list_between(range, pool)
            .await
            .map_err(query_error)?;
        Ok(reviews.into_iter().map(GqlReview::from).collect())
    }

    async fn get_reviews_above_percentage(
        &self,
        ctx: &Context<'_>,
        min_percentage: f64,
    ) -> Result<Vec<GqlReview>> {
        tracing::info!(min_percentage, "graphql.get_reviews_above_percentage");
        let pool = ctx.data_unchecked::<PgPool>();
        let reviews = Review::list_above_percentage(min_percentage, pool)
            .await
            .map_err(query_error)?;
        Ok(reviews.into_iter().map(GqlReview::from).collect())
    }

    /// Mean review percentage; 0 when the product has no reviews.
    async fn get_product_average_rating(&self, ctx: &Context<'_>, product_id: i32) -> Result<f64> {
        tracing::info!(product_id, "graphql.get_product_average_rating");
        let pool = ctx.data_unchecked::<PgPool>();
        Review::average_rating(product_id, pool)
            .await
            .map_err(query_error)
    }

    async fn get_product_feedback_summary(
        &self,
        ctx: &Context<'_>,
        product_id: i32,
    ) -> Result<GqlFeedbackSummary> {
        tracing::info!(product_id, "graphql.get_product_feedback_summary");
        let pool = ctx.data_unchecked::<PgPool>();
        let summary = Review::feedback_summary(product_id, pool)
            .await
            .map_err(query_error)?;
        Ok(summary.into())
    }

    async fn get_reviews_by_sentiment(
        &self,
        ctx: &Context<'_>,
        product_id: i32,
        sentiment: GqlSentiment,
    ) -> Result<Vec<GqlReview>> {
        tracing::info!(product_id, sentiment = ?sentiment, "graphql.get_reviews_by_sentiment");
        let pool = ctx.data_unchecked::<PgPool>();
        let reviews = Review::list_by_sentiment(product_id, sentiment.into(), pool)
            .await
            .map_err(query_error)?;
        Ok(reviews.into_iter().map(GqlReview::from).collect())
    }
}
