use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // JWT
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,

    // Server
    pub host: String,
    pub port: u16,
    pub cors_allowed_origin: String,
    pub log_format: LogFormat,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid("LOG_FORMAT")),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            // Database
            database_url: get_or("DATABASE_URL", "sqlite://data/taskflow.db"),
            database_max_connections: get_or("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,

            // JWT
            jwt_secret: lookup("JWT_SECRET")
                .filter(|secret| !secret.is_empty())
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiration_minutes: get_or("JWT_EXPIRATION_MINUTES", "15")
                .parse()
                .ok()
                .filter(|minutes: &i64| *minutes > 0)
                .ok_or(ConfigError::Invalid("JWT_EXPIRATION_MINUTES"))?,

            // Server
            host: get_or("HOST", "0.0.0.0"),
            port: get_or("PORT", "8000")
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            cors_allowed_origin: get_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            log_format: get_or("LOG_FORMAT", "text").parse()?,
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
