pub mod config;
pub mod deps;
pub mod error;
pub mod file_config;

pub use config::AppConfig;
pub use deps::ServerDeps;
pub use error::{QueryError, QueryResult};
pub use file_config::FileConfig;
