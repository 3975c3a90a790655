pub mod models;

pub use models::entry::{RaffleEntry, RaffleStatistics};
pub use models::raffle::Raffle;
