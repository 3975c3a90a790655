pub mod flag;
pub mod product;
