use chrono::{DateTime, Utc};
use marketplace_core::QueryResult;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::DateRange;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub quantity: i32,
    pub total_price: f64,
    pub sold_at: DateTime<Utc>,
}

/// Totals over the sales inside a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub sale_count: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

impl SalesSummary {
    pub fn from_sales(sales: &[Sale]) -> Self {
        sales.iter().fold(Self::default(), |mut acc, sale| {
            acc.sale_count += 1;
            acc.total_quantity += i64::from(sale.quantity);
            acc.total_revenue += sale.total_price;
            acc
        })
    }
}

impl Sale {
    pub async fn list_between(range: DateRange, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM sales WHERE sold_at BETWEEN $1 AND $2 ORDER BY sold_at ASC",
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_for_product(product_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM sales WHERE product_id = $1 ORDER BY sold_at DESC",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Purchases made by a user.
    pub async fn list_for_user(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sales WHERE user_id = $1 ORDER BY sold_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_recent(limit: i64, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sales ORDER BY sold_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn summary(range: DateRange, pool: &PgPool) -> QueryResult<SalesSummary> {
        let sales = Self::list_between(range, pool).await?;
        Ok(SalesSummary::from_sales(&sales))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(quantity: i32, total_price: f64) -> Sale {
        Sale {
            id: 0,
            product_id: 1,
            user_id: 1,
            quantity,
            total_price,
            sold_at: Utc::now(),
        }
    }

    #[test]
    fn summary_sums_quantity_and_revenue() {
        let summary = SalesSummary::from_sales(&[sale(2, 40.0), sale(1, 15.5), sale(3, 90.0)]);
        assert_eq!(summary.sale_count, 3);
        assert_eq!(summary.total_quantity, 6);
        assert!((summary.total_revenue - 145.5).abs() < 1e-9);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(SalesSummary::from_sales(&[]), SalesSummary::default());
    }
}
