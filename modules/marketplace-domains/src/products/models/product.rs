use chrono::{DateTime, Utc};
use marketplace_core::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::{Condition, DateRange, SortOrder};
use crate::stats;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub seller_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub cost: Option<f64>,
    pub stock: i32,
    pub quantity: i32,
    #[sqlx(try_from = "String")]
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
    pub listed_at: DateTime<Utc>,
    pub sold_at: Option<DateTime<Utc>>,
}

/// Field a product collection is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    CreatedAt,
    Price,
}

impl ProductSort {
    fn column(&self) -> &'static str {
        match self {
            ProductSort::CreatedAt => "created_at",
            ProductSort::Price => "price",
        }
    }
}

/// A product with its computed profit margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMargin {
    pub product: Product,
    pub margin: f64,
}

/// A product with the size of one of its related collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCount {
    pub product: Product,
    pub count: i64,
}

impl Product {
    pub async fn find_by_id(id: i32, pool: &PgPool) -> QueryResult<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| QueryError::not_found("product", id))
    }

    pub async fn find_by_ids(ids: &[i32], pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_all(sort: ProductSort, order: SortOrder, pool: &PgPool) -> QueryResult<Vec<Self>> {
        let sql = format!(
            "SELECT * FROM products ORDER BY {} {}",
            sort.column(),
            order.sql()
        );
        sqlx::query_as::<_, Self>(&sql)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Products priced within `[min_price, max_price]`, ordered by price.
    pub async fn list_by_price_range(
        min_price: f64,
        max_price: f64,
        order: SortOrder,
        limit: Option<i64>,
        pool: &PgPool,
    ) -> QueryResult<Vec<Self>> {
        if min_price > max_price {
            return Err(QueryError::invalid(format!(
                "minPrice {min_price} is greater than maxPrice {max_price}"
            )));
        }

        let mut qb = sqlx::QueryBuilder::new("SELECT * FROM products WHERE price BETWEEN ");
        qb.push_bind(min_price);
        qb.push(" AND ");
        qb.push_bind(max_price);
        qb.push(format!(" ORDER BY price {}", order.sql()));
        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }

        qb.build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_recent(limit: i64, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products ORDER BY created_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_by_condition(condition: Condition, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE condition = $1")
            .bind(condition.as_str())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_sold_between(range: DateRange, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE sold_at BETWEEN $1 AND $2")
            .bind(range.start())
            .bind(range.end())
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Products with `stock <= max_stock`, lowest stock first.
    pub async fn list_low_stock(max_stock: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        if max_stock < 0 {
            return Err(QueryError::invalid(format!(
                "maxStock must be >= 0, got {max_stock}"
            )));
        }
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE stock <= $1 ORDER BY stock ASC")
            .bind(max_stock)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_by_seller(seller_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE seller_id = $1")
            .bind(seller_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count_by_seller(seller_id: i32, pool: &PgPool) -> QueryResult<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM products WHERE seller_id = $1")
            .bind(seller_id)
            .fetch_one(pool)
            .await
            .map(|r| r.0)
            .map_err(Into::into)
    }

    pub async fn list_favorited_by(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT p.*
            FROM favorites f
            JOIN products p ON p.id = f.product_id
            WHERE f.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_viewed_by(user_id: i32, pool: &PgPool) -> QueryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT p.*
            FROM product_views v
            JOIN products p ON p.id = v.product_id
            WHERE v.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Products with a positive cost, paired with `(price - cost) / cost`.
    /// Products whose cost is null or non-positive are excluded.
    pub async fn with_profit_margin(
        min_margin: Option<f64>,
        pool: &PgPool,
    ) -> QueryResult<Vec<ProductMargin>> {
        let products = sqlx::query_as::<_, Self>("SELECT * FROM products")
            .fetch_all(pool)
            .await?;

        Ok(stats::filter_by_margin(products, min_margin, |p| (p.price, p.cost))
            .into_iter()
            .map(|(product, margin)| ProductMargin { product, margin })
            .collect())
    }

    /// Products with at least `min_count` reviews. Reviews are loaded and
    /// counted in memory.
    pub async fn list_by_review_count(min_count: usize, pool: &PgPool) -> QueryResult<Vec<Self>> {
        Self::list_by_related_count("reviews", min_count, pool).await
    }

    /// Products with at least `min_count` flags.
    pub async fn list_by_flag_count(min_count: usize, pool: &PgPool) -> QueryResult<Vec<Self>> {
        Self::list_by_related_count("product_flags", min_count, pool).await
    }

    /// Products ranked by view count, highest first.
    pub async fn most_viewed(limit: usize, pool: &PgPool) -> QueryResult<Vec<ProductCount>> {
        Self::ranked_by_related_count("product_views", limit, pool).await
    }

    /// Products ranked by how many users favorited them, highest first.
    pub async fn most_favorited(limit: usize, pool: &PgPool) -> QueryResult<Vec<ProductCount>> {
        Self::ranked_by_related_count("favorites", limit, pool).await
    }

    // `table` is always one of the fixed relation names above.
    async fn related_counts(
        table: &'static str,
        pool: &PgPool,
    ) -> QueryResult<std::collections::HashMap<i32, usize>> {
        let rows = sqlx::query_as::<_, (i32,)>(&format!("SELECT product_id FROM {table}"))
            .fetch_all(pool)
            .await?;
        Ok(stats::count_by(rows.into_iter().map(|(id,)| id)))
    }

    async fn list_by_related_count(
        table: &'static str,
        min_count: usize,
        pool: &PgPool,
    ) -> QueryResult<Vec<Self>> {
        let (products, counts) = tokio::try_join!(
            async {
                sqlx::query_as::<_, Self>("SELECT * FROM products")
                    .fetch_all(pool)
                    .await
                    .map_err(QueryError::from)
            },
            Self::related_counts(table, pool),
        )?;
        Ok(stats::retain_min_count(products, &counts, min_count, |p| p.id))
    }

    async fn ranked_by_related_count(
        table: &'static str,
        limit: usize,
        pool: &PgPool,
    ) -> QueryResult<Vec<ProductCount>> {
        let counts = Self::related_counts(table, pool).await?;
        let ids: Vec<i32> = counts.keys().copied().collect();
        let products = Self::find_by_ids(&ids, pool).await?;

        Ok(stats::rank_by_count(products, &counts, limit, |p| p.id)
            .into_iter()
            .map(|(product, count)| ProductCount {
                product,
                count: count as i64,
            })
            .collect())
    }
}
