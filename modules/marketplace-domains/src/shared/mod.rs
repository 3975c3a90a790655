#[macro_use]
mod text_enum;
pub mod args;
pub mod enums;

pub use args::{validate_limit, validate_threshold, DateRange, SortOrder};
pub use enums::*;
pub use text_enum::ParseEnumError;
