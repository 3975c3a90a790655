pub mod inbox;
pub mod rewards;
pub mod search;
pub mod social;
pub mod user;
