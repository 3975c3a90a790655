use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use marketplace_domains::raffles::{Raffle, RaffleEntry, RaffleStatistics};

use crate::graphql::enums::{GqlRaffleResult, GqlRaffleStatus, GqlRaffleType};
use crate::graphql::error::loader_error;
use crate::graphql::loaders::*;
use crate::graphql::products::types::GqlProduct;
use crate::graphql::scalars::Timestamp;
use crate::graphql::users::types::GqlUser;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Raffle", complex)]
pub struct GqlRaffle {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub description: String,
    #[graphql(name = "type")]
    pub raffle_type: GqlRaffleType,
    pub status: GqlRaffleStatus,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<Raffle> for GqlRaffle {
    fn from(r: Raffle) -> Self {
        Self {
            id: r.id,
            product_id: r.product_id,
            title: r.title,
            description: r.description,
            raffle_type: r.raffle_type.into(),
            status: r.status.into(),
            ends_at: r.ends_at.into(),
            created_at: r.created_at.into(),
        }
    }
}

#[ComplexObject]
impl GqlRaffle {
    async fn product(&self, ctx: &Context<'_>) -> Result<Option<GqlProduct>> {
        let loader = ctx.data_unchecked::<DataLoader<ProductByIdLoader>>();
        loader.load_one(self.product_id).await.map_err(loader_error)
    }

    async fn entries(&self, ctx: &Context<'_>) -> Result<Vec<GqlRaffleEntry>> {
        let loader = ctx.data_unchecked::<DataLoader<EntriesForRaffleLoader>>();
        Ok(loader
            .load_one(self.id)
            .await
            .map_err(loader_error)?
            .unwrap_or_default())
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "RaffleEntry", complex)]
pub struct GqlRaffleEntry {
    pub id: i32,
    pub user_id: i32,
    pub raffle_id: i32,
    pub result: GqlRaffleResult,
    pub created_at: Timestamp,
}

impl From<RaffleEntry> for GqlRaffleEntry {
    fn from(e: RaffleEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            raffle_id: e.raffle_id,
            result: e.result.into(),
            created_at: e.created_at.into(),
        }
    }
}

#[ComplexObject]
impl GqlRaffleEntry {
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<GqlUser>> {
        let loader = ctx.data_unchecked::<DataLoader<UserByIdLoader>>();
        loader.load_one(self.user_id).await.map_err(loader_error)
    }

    async fn raffle(&self, ctx: &Context<'_>) -> Result<Option<GqlRaffle>> {
        let loader = ctx.data_unchecked::<DataLoader<RaffleByIdLoader>>();
        loader.load_one(self.raffle_id).await.map_err(loader_error)
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "RaffleStatistics")]
pub struct GqlRaffleStatistics {
    pub raffle_id: i32,
    pub total_entries: i64,
    pub won: i64,
    pub lost: i64,
    pub pending: i64,
}

impl From<RaffleStatistics> for GqlRaffleStatistics {
    fn from(s: RaffleStatistics) -> Self {
        Self {
            raffle_id: s.raffle_id,
            total_entries: s.total_entries,
            won: s.won,
            lost: s.lost,
            pending: s.pending,
        }
    }
}
