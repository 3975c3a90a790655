use async_graphql::dataloader::Loader;
use marketplace_core::QueryError;
use marketplace_domains::products::Product;
use marketplace_domains::raffles::{Raffle, RaffleEntry};
use marketplace_domains::reviews::Review;
use marketplace_domains::users::User;
use std::collections::HashMap;
use std::sync::Arc;

use super::products::types::GqlProduct;
use super::raffles::types::{GqlRaffle, GqlRaffleEntry};
use super::reviews::types::GqlReview;
use super::users::types::GqlUser;

// ─── User by ID ──────────────────────────────────────────────────────────────

pub struct UserByIdLoader {
    pub pool: sqlx::PgPool,
}

impl Loader<i32> for UserByIdLoader {
    type Value = GqlUser;
    type Error = Arc<QueryError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = User::find_by_ids(keys, &self.pool).await.map_err(Arc::new)?;
        Ok(rows.into_iter().map(|u| (u.id, GqlUser::from(u))).collect())
    }
}

// ─── Product by ID ───────────────────────────────────────────────────────────

pub struct ProductByIdLoader {
    pub pool: sqlx::PgPool,
}

impl Loader<i32> for ProductByIdLoader {
    type Value = GqlProduct;
    type Error = Arc<QueryError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = Product::find_by_ids(keys, &self.pool)
            .await
            .map_err(Arc::new)?;
        Ok(rows
            .into_iter()
            .map(|p| (p.id, GqlProduct::from(p)))
            .collect())
    }
}

// ─── Raffle by ID ────────────────────────────────────────────────────────────

pub struct RaffleByIdLoader {
    pub pool: sqlx::PgPool,
}

impl Loader<i32> for RaffleByIdLoader {
    type Value = GqlRaffle;
    type Error = Arc<QueryError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = Raffle::find_by_ids(keys, &self.pool).await.map_err(Arc::new)?;
        Ok(rows
            .into_iter()
            .map(|r| (r.id, GqlRaffle::from(r)))
            .collect())
    }
}

// ─── Reviews for product ─────────────────────────────────────────────────────

pub struct ReviewsForProductLoader {
    pub pool: sqlx::PgPool,
}

impl Loader<i32> for ReviewsForProductLoader {
    type Value = Vec<GqlReview>;
    type Error = Arc<QueryError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = Review::list_for_products(keys, &self.pool)
            .await
            .map_err(Arc::new)?;

        let mut grouped: HashMap<i32, Vec<GqlReview>> = HashMap::new();
        for review in rows {
            grouped
                .entry(review.product_id)
                .or_default()
                .push(GqlReview::from(review));
        }
        Ok(grouped)
    }
}

// ─── Entries for raffle ──────────────────────────────────────────────────────

pub struct EntriesForRaffleLoader {
    pub pool: sqlx::PgPool,
}

impl Loader<i32> for EntriesForRaffleLoader {
    type Value = Vec<GqlRaffleEntry>;
    type Error = Arc<QueryError>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = RaffleEntry::list_for_raffles(keys, &self.pool)
            .await
            .map_err(Arc::new)?;

        let mut grouped: HashMap<i32, Vec<GqlRaffleEntry>> = HashMap::new();
        for entry in rows {
            grouped
                .entry(entry.raffle_id)
                .or_default()
                .push(GqlRaffleEntry::from(entry));
        }
        Ok(grouped)
    }
}
