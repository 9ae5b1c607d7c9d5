#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let max_connections: u32 = env_or("TASKBOARD_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid TASKBOARD_DB_MAX_CONNECTIONS: {e}"))?;
        if max_connections == 0 {
            return Err("TASKBOARD_DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        let log_level = env_or("TASKBOARD_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            max_connections,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
