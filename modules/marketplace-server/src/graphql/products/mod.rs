pub mod types;

use async_graphql::*;
use marketplace_domains::products::{Product, ProductFlag};
use sqlx::PgPool;
use types::*;

use super::args::{bounded_limit, date_range, min_count};
use super::enums::{GqlCondition, GqlProductFlagStatus, GqlProductSort, GqlSortOrder};
use super::error::query_error;
use super::scalars::Timestamp;

#[derive(Default)]
pub struct ProductQuery;

#[Object]
impl ProductQuery {
    async fn get_product_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<GqlProduct> {
        tracing::info!(id, "graphql.get_product_by_id");
        let pool = ctx.data_unchecked::<PgPool>();
        let product = Product::find_by_id(id, pool).await.map_err(query_error)?;
        Ok(product.into())
    }

    /// All products, newest first unless `sort`/`order` say otherwise.
    async fn get_all_products(
        &self,
        ctx: &Context<'_>,
        sort: Option<GqlProductSort>,
        order: Option<GqlSortOrder>,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(sort = ?sort, order = ?order, "graphql.get_all_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let products = Product::list_all(
            sort.map(Into::into).unwrap_or_default(),
            order.map(Into::into).unwrap_or_default(),
            pool,
        )
        .await
        .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_products_by_price_range(
        &self,
        ctx: &Context<'_>,
        min_price: f64,
        max_price: f64,
        order: Option<GqlSortOrder>,
        limit: Option<i32>,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(min_price, max_price, limit = ?limit, "graphql.get_products_by_price_range");
        let pool = ctx.data_unchecked::<PgPool>();
        let limit = limit.map(|l| bounded_limit(ctx, l)).transpose()?;
        let products = Product::list_by_price_range(
            min_price,
            max_price,
            order.map(Into::into).unwrap_or_default(),
            limit,
            pool,
        )
        .await
        .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_recent_products(&self, ctx: &Context<'_>, limit: i32) -> Result<Vec<GqlProduct>> {
        tracing::info!(limit, "graphql.get_recent_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let limit = bounded_limit(ctx, limit)?;
        let products = Product::list_recent(limit, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_products_by_condition(
        &self,
        ctx: &Context<'_>,
        condition: GqlCondition,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(condition = ?condition, "graphql.get_products_by_condition");
        let pool = ctx.data_unchecked::<PgPool>();
        let products = Product::list_by_condition(condition.into(), pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_products_sold_between(
        &self,
        ctx: &Context<'_>,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(start_date = %start_date.0, end_date = %end_date.0, "graphql.get_products_sold_between");
        let pool = ctx.data_unchecked::<PgPool>();
        let range = date_range(start_date, end_date)?;
        let products = Product::list_sold_between(range, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    /// Products with `stock <= maxStock`, lowest stock first.
    async fn get_low_stock_products(
        &self,
        ctx: &Context<'_>,
        max_stock: i32,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(max_stock, "graphql.get_low_stock_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let products = Product::list_low_stock(max_stock, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    /// Products with a positive cost and, when given, a margin of at least `minMargin`.
    async fn get_products_by_profit_margin(
        &self,
        ctx: &Context<'_>,
        min_margin: Option<f64>,
    ) -> Result<Vec<GqlProductMargin>> {
        tracing::info!(min_margin = ?min_margin, "graphql.get_products_by_profit_margin");
        let pool = ctx.data_unchecked::<PgPool>();
        let rows = Product::with_profit_margin(min_margin, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlProductMargin::from).collect())
    }

    async fn get_most_viewed_products(
        &self,
        ctx: &Context<'_>,
        limit: i32,
    ) -> Result<Vec<GqlProductCount>> {
        tracing::info!(limit, "graphql.get_most_viewed_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let limit = bounded_limit(ctx, limit)?;
        let rows = Product::most_viewed(limit as usize, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlProductCount::from).collect())
    }

    async fn get_most_favorited_products(
        &self,
        ctx: &Context<'_>,
        limit: i32,
    ) -> Result<Vec<GqlProductCount>> {
        tracing::info!(limit, "graphql.get_most_favorited_products");
        let pool = ctx.data_unchecked::<PgPool>();
        let limit = bounded_limit(ctx, limit)?;
        let rows = Product::most_favorited(limit as usize, pool)
            .await
            .map_err(query_error)?;
        Ok(rows.into_iter().map(GqlProductCount::from).collect())
    }

    /// Products with at least `minRatingCount` reviews.
    async fn get_products_by_rating_count(
        &self,
        ctx: &Context<'_>,
        min_rating_count: i32,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(min_rating_count, "graphql.get_products_by_rating_count");
        let pool = ctx.data_unchecked::<PgPool>();
        let threshold = min_count("minRatingCount", min_rating_count)?;
        let products = Product::list_by_review_count(threshold, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    /// Products with at least `minFlagCount` flags.
    async fn get_products_by_flag_count(
        &self,
        ctx: &Context<'_>,
        min_flag_count: i32,
    ) -> Result<Vec<GqlProduct>> {
        tracing::info!(min_flag_count, "graphql.get_products_by_flag_count");
        let pool = ctx.data_unchecked::<PgPool>();
        let threshold = min_count("minFlagCount", min_flag_count)?;
        let products = Product::list_by_flag_count(threshold, pool)
            .await
            .map_err(query_error)?;
        Ok(products.into_iter().map(GqlProduct::from).collect())
    }

    async fn get_product_flags(
        &self,
        ctx: &Context<'_>,
        product_id: i32,
        status: Option<GqlProductFlagStatus>,
    ) -> Result<Vec<GqlProductFlag>> {
        tracing::info!(product_id, status = ?status, "graphql.get_product_flags");
        let pool = ctx.data_unchecked::<PgPool>();
        let flags = ProductFlag::list_for_product(product_id, status.map(Into::into), pool)
            .await
            .map_err(query_error)?;
        Ok(flags.into_iter().map(GqlProductFlag::from).collect())
    }
}
