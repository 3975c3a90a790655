pub mod accounts;
pub mod args;
pub mod enums;
pub mod error;
pub mod loaders;
pub mod products;
pub mod raffles;
pub mod reviews;
pub mod sales;
pub mod scalars;
pub mod users;

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use marketplace_core::ServerDeps;

use loaders::*;

/// Merged query root composing all domain query modules.
#[derive(MergedObject, Default)]
pub struct QueryRoot(
    users::UserQuery,
    products::ProductQuery,
    reviews::ReviewQuery,
    raffles::RaffleQuery,
    sales::SaleQuery,
);

/// Merged mutation root composing all domain mutation modules.
#[derive(MergedObject, Default)]
pub struct MutationRoot(accounts::AccountMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(deps: Arc<ServerDeps>) -> AppSchema {
    let pool = deps.pool().clone();

    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(pool.clone())
        .data(deps)
        // DataLoaders
        .data(DataLoader::new(
            UserByIdLoader { pool: pool.clone() },
            tokio::spawn,
        ))
        .data(DataLoader::new(
            ProductByIdLoader { pool: pool.clone() },
            tokio::spawn,
        ))
        .data(DataLoader::new(
            RaffleByIdLoader { pool: pool.clone() },
            tokio::spawn,
        ))
        .data(DataLoader::new(
            ReviewsForProductLoader { pool: pool.clone() },
            tokio::spawn,
        ))
        .data(DataLoader::new(
            EntriesForRaffleLoader { pool },
            tokio::spawn,
        ))
        .limit_depth(10)
        .limit_complexity(1000)
        .finish()
}
