use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// TOML-backed configuration loaded from disk.
/// Secrets (DB URL, elevation phrases) stay as env vars.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub graphql_path: String,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            graphql_path: "/api/graphql".to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { max_connections: 20 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct QueryConfig {
    /// Upper bound applied to caller-supplied `limit` arguments.
    pub max_limit: i64,
    /// Window used by the active-users query.
    pub active_window_days: i64,
}

/// Longest window the active-users query may look back.
pub const MAX_ACTIVE_WINDOW_DAYS: i64 = 36_500;

impl QueryConfig {
    fn validate(&self) -> Result<()> {
        if self.max_limit < 1 {
            anyhow::bail!("[query] max_limit must be at least 1, got {}", self.max_limit);
        }
        if !(1..=MAX_ACTIVE_WINDOW_DAYS).contains(&self.active_window_days) {
            anyhow::bail!(
                "[query] active_window_days must be within 1..={}, got {}",
                MAX_ACTIVE_WINDOW_DAYS,
                self.active_window_days
            );
        }
        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_limit: 500,
            active_window_days: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccountsConfig {
    pub bcrypt_cost: u32,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(content)?;
    config.query.validate().context("Invalid [query] section")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.graphql_path, "/api/graphql");
        assert_eq!(config.query.active_window_days, 30);
        assert_eq!(config.accounts.bcrypt_cost, 10);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = parse_config(
            r#"
            [server]
            port = 8080
            allowed_origins = ["https://shop.example"]

            [query]
            max_limit = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.allowed_origins, vec!["https://shop.example"]);
        assert_eq!(config.query.max_limit, 50);
        assert_eq!(config.query.active_window_days, 30);
    }

    #[test]
    fn shipped_config_parses() {
        let config = parse_config(include_str!("../../../config/marketplace.toml")).unwrap();
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.query.max_limit, 500);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[server]\nprot = 1\n").is_err());
        assert!(parse_config("[cache]\nttl = 1\n").is_err());
    }

    #[test]
    fn non_positive_max_limit_is_rejected() {
        let err = parse_config("[query]\nmax_limit = -5\n").unwrap_err();
        assert!(format!("{err:#}").contains("max_limit"));
        assert!(parse_config("[query]\nmax_limit = 0\n").is_err());
        assert_eq!(parse_config("[query]\nmax_limit = 1\n").unwrap().query.max_limit, 1);
    }

    #[test]
    fn active_window_outside_range_is_rejected() {
        let huge = format!("[query]\nactive_window_days = {}\n", i64::MAX);
        let err = parse_config(&huge).unwrap_err();
        assert!(format!("{err:#}").contains("active_window_days"));
        assert!(parse_config("[query]\nactive_window_days = 0\n").is_err());
        assert!(parse_config("[query]\nactive_window_days = -7\n").is_err());
        let edge = format!("[query]\nactive_window_days = {MAX_ACTIVE_WINDOW_DAYS}\n");
        assert_eq!(
            parse_config(&edge).unwrap().query.active_window_days,
            MAX_ACTIVE_WINDOW_DAYS
        );
    }
}
