pub mod entry;
pub mod raffle;
