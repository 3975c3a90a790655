pub mod models;

pub use models::sale::{Sale, SalesSummary};
