pub mod types;

use async_graphql::*;
use marketplace_domains::raffles::{Raffle, RaffleEntry};
use sqlx::PgPool;
use types::*;

use super::args::{date_range, min_count};
use super::enums::{GqlRaffleResult, GqlRaffleStatus, GqlRaffleType};
use super::error::query_error;
use super::scalars::Timestamp;

#[derive(Default)]
pub struct RaffleQuery;

#[Object]
impl RaffleQuery {
    async fn get_raffle_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<GqlRaffle> {
        tracing::info!(id, "graphql.get_raffle_by_id");
        let pool = ctx.data_unchecked::<PgPool>();
        let raffle = Raffle::find_by_id(id, pool).await.map_err(query_error)?;
        Ok(raffle.into())
    }

    async fn get_raffles_by_status(
        &self,
        ctx: &Context<'_>,
        status: GqlRaffleStatus,
    ) -> Result<Vec<GqlRaffle>> {
        tracing::info!(status = ?status, "graphql.get_raffles_by_status");
        let pool = ctx.data_unchecked::<PgPool>();
        let raffles = Raffle::list_by_status(status.into(), pool)
            .await
            .map_err(query_error)?;
        Ok(raffles.into_iter().map(GqlRaffle::from).collect())
    }

    async fn get_raffles_by_type(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "type")] raffle_type: GqlRaffleType,
    ) -> Result<Vec<GqlRaffle>> {
        tracing::info!(raffle_type = ?raffle_type, "graphql.get_raffles_by_type");
        let pool = ctx.data_unchecked::<PgPool>();
        let raffles = Raffle::list_by_type(raffle_type.into(), pool)
            .await
            .map_err(query_error)?;
        Ok(raffles.into_iter().map(GqlRaffle::from).collect())
    }

    async fn get_raffles_ending_between(
        &self,
        ctx: &Context<'_>,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<Vec<GqlRaffle>> {
        tracing::info!(start_date = %start_date.0, end_date = %end_date.0, "graphql.get_raffles_ending_between");
        let pool = ctx.data_unchecked::<PgPool>();
        let range = date_range(start_date, end_date)?;
        let raffles = Raffle::list_ending_between(range, pool)
            .await
            .map_err(query_error)?;
        Ok(raffles.into_iter().map(GqlRaffle::from).collect())
    }

    async fn get_raffle_entry_count(&self, ctx: &Context<'_>, raffle_id: i32) -> Result<i64> {
        tracing::info!(raffle_id, "graphql.get_raffle_entry_count");
        let pool = ctx.data_unchecked::<PgPool>();
        RaffleEntry::count_for_raffle(raffle_id, pool)
            .await
            .map_err(query_error)
    }

    /// Entries of the raffle with result WON.
    async fn get_raffle_winners(
        &self,
        ctx: &Context<'_>,
        raffle_id: i32,
    ) -> Result<Vec<GqlRaffleEntry>> {
        tracing::info!(raffle_id, "graphql.get_raffle_winners");
        let pool = ctx.data_unchecked::<PgPool>();
        let entries = RaffleEntry::list_winners(raffle_id, pool)
            .await
            .map_err(query_error)?;
        Ok(entries.into_iter().map(GqlRaffleEntry::from).collect())
    }

    async fn get_entries_by_result(
        &self,
        ctx: &Context<'_>,
        raffle_id: i32,
        #[graphql(name = "result")] outcome: GqlRaffleResult,
    ) -> Result<Vec<GqlRaffleEntry>> {
        tracing::info!(raffle_id, result = ?outcome, "graphql.get_entries_by_result");
        let pool = ctx.data_unchecked::<PgPool>();
        let entries = RaffleEntry::list_by_result(raffle_id, outcome.into(), pool)
            .await
            .map_err(query_error)?;
        Ok(entries.into_iter().map(GqlRaffleEntry::from).collect())
    }

    async fn get_raffle_statistics(
        &self,
        ctx: &Context<'_>,
        raffle_id: i32,
    ) -> Result<GqlRaffleStatistics> {
        tracing::info!(raffle_id, "graphql.get_raffle_statistics");
        let pool = ctx.data_unchecked::<PgPool>();
        let stats = RaffleEntry::statistics(raffle_id, pool)
            .await
            .map_err(query_error)?;
        Ok(stats.into())
    }

    /// Raffles with at least `minEntryCount` entries.
    async fn get_raffles_by_entry_count(
        &self,
        ctx: &Context<'_>,
        min_entry_count: i32,
    ) -> Result<Vec<GqlRaffle>> {
        tracing::info!(min_entry_count, "graphql.get_raffles_by_entry_count");
        let pool = ctx.data_unchecked::<PgPool>();
        let threshold = min_count("minEntryCount", min_entry_count)?;
        let raffles = Raffle::list_by_entry_count(threshold, pool)
            .await
            .map_err(query_error)?;
        Ok(raffles.into_iter().map(GqlRaffle::from).collect())
    }

    async fn get_user_raffle_entries(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
    ) -> Result<Vec<GqlRaffleEntry>> {
        tracing::info!(user_id, "graphql.get_user_raffle_entries");
        let pool = ctx.data_unchecked::<PgPool>();
        let entries = RaffleEntry::list_for_user(user_id, pool)
            .await
            .map_err(query_error)?;
        Ok(entries.into_iter().map(GqlRaffleEntry::from).collect())
    }

    /// Won entries over all entries, as a percentage. 0 without entries.
    async fn get_user_winning_percentage(&self, ctx: &Context<'_>, user_id: i32) -> Result<f64> {
        tracing::info!(user_id, "graphql.get_user_winning_percentage");
        let pool = ctx.data_unchecked::<PgPool>();
        RaffleEntry::winning_percentage(user_id, pool)
            .await
            .map_err(query_error)
    }

    /// User entries over all raffles, as a percentage. 0 when no raffles exist.
    async fn get_user_participation_rate(&self, ctx: &Context<'_>, user_id: i32) -> Result<f64> {
        tracing::info!(user_id, "graphql.get_user_participation_rate");
        let pool = ctx.data_unchecked::<PgPool>();
        RaffleEntry::participation_rate(user_id, pool)
            .await
            .map_err(query_error)
    }
}
