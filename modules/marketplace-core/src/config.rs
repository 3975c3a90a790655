use anyhow::Result;

/// Application configuration loaded from environment variables.
/// Contains only secrets and env-specific values; server, database and
/// query tuning live in the TOML FileConfig.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    // Database
    pub database_url: String,

    // Account elevation phrases
    pub admin_phrase: Option<String>,
    pub moderator_phrase: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")?,
            admin_phrase: non_empty_var("ADMIN_PHRASE"),
            moderator_phrase: non_empty_var("MODERATOR_PHRASE"),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => format!("<set>({} chars)", v.len()),
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  ADMIN_PHRASE: {}", preview_opt(&self.admin_phrase));
        tracing::info!("  MODERATOR_PHRASE: {}", preview_opt(&self.moderator_phrase));
    }
}

// An empty phrase variable must never match an empty user phrase.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
