pub mod models;

pub use models::flag::ProductFlag;
pub use models::product::{Product, ProductCount, ProductMargin, ProductSort};
