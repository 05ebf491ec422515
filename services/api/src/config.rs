pub const DEFAULT_STORE_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DB_NAME: &str = "AgriMate";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Service configuration resolved once at startup. The legacy variable
/// names (`MONGO_URL`, `DB_NAME`) remain honored as fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub store_url: String,
    pub db_name: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            store_url: env_with_fallback("AGRIMATE_STORE_URL", "MONGO_URL")
                .unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
            db_name: env_with_fallback("AGRIMATE_DB_NAME", "DB_NAME")
                .unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
        }
    }
}

pub fn resolve_bind_addr() -> String {
    std::env::var("AGRIMATE_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

pub(crate) fn env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}
