#[macro_use]
pub mod shared;
pub mod products;
pub mod raffles;
pub mod reviews;
pub mod sales;
pub mod stats;
pub mod users;

pub use marketplace_core::{QueryError, QueryResult};
