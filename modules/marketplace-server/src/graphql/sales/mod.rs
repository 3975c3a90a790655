pub mod types;

use async_graphql::*;
use marketplace_domains::sales::Sale;
use sqlx::PgPool;
use types::*;

use super::args::{bounded_limit, date_range};
use super::error::query_error;
use super::scalars::Date;

#[derive(Default)]
pub struct SaleQuery;

#[Object]
impl SaleQuery {
    /// Sales within `[startDate, endDate]`, given as epoch milliseconds.
    async fn get_sales_by_date_range(
        &self,
        ctx: &Context<'_>,
        start_date: Date,
        end_date: Date,
    ) -> Result<Vec<GqlSale>> {
        tracing::info!(start_date = %start_date.0, end_date = %end_date.0, "graphql.get_sales_by_date_range");
        let pool = ctx.data_unchecked::<PgPool>();
        let range = date_range(start_date, end_date)?;
        let sales = Sale::list_between(range, pool)
            .await
            .map_err(query_error)?;
        Ok(sales.into_iter().map(GqlSale::from).collect())
    }

    async fn get_product_sales(&self, ctx: &Context<'_>, product_id: i32) -> Result<Vec<GqlSale>> {
        tracing::info!(product_id, "graphql.get_product_sales");
        let pool = ctx.data_unchecked::<PgPool>();
        let sales = Sale::list_for_product(product_id, pool)
            .await
            .map_err(query_error)?;
        Ok(sales.into_iter().map(GqlSale::from).collect())
    }

    async fn get_user_purchases(&self, ctx: &Context<'_>, user_id: i32) -> Result<Vec<GqlSale>> {
        tracing::info!(user_id, "graphql.get_user_purchases");
        let pool = ctx.data_unchecked::<PgPool>();
        let sales = Sale::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(sales.into_iter().map(GqlSale::from).collect())
    }

    async fn get_recent_sales(&self, ctx: &Context<'_>, limit: i32) -> Result<Vec<GqlSale>> {
        tracing::info!(limit, "graphql.get_recent_sales");
        let pool = ctx.data_unchecked::<PgPool>();
        let limit = bounded_limit(ctx, limit)?;
        let sales = Sale::list_recent(limit, pool).await.map_err(query_error)?;
        Ok(sales.into_iter().map(GqlSale::from).collect())
    }

    async fn get_sales_summary(
        &self,
        ctx: &Context<'_>,
        start_date: Date,
        end_date: Date,
    ) -> Result<GqlSalesSummary> {
        tracing::info!(start_date = %start_date.0, end_date = %end_date.0, "graphql.get_sales_summary");
        let pool = ctx.data_unchecked::<PgPool>();
        let range = date_range(start_date, end_date)?;
        let summary = Sale::summary(range, pool).await.map_err(query_error)?;
        Ok(summary.into())
    }
}
