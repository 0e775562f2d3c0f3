//! Configuration management for the server.

use std::env;

use vendstock_engine::CounterPolicy;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// How counter text in reports is parsed
    pub counter_policy: CounterPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidMaxConnections)?;

        let counter_policy = match lookup("COUNTER_PARSING") {
            Some(value) => value
                .parse::<CounterPolicy>()
                .map_err(ConfigError::InvalidCounterParsing)?,
            None => CounterPolicy::default(),
        };

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            counter_policy,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,

    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("DATABASE_MAX_CONNECTIONS must be a positive integer")]
    InvalidMaxConnections,

    #[error("Invalid COUNTER_PARSING value: {0}")]
    InvalidCounterParsing(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/vendstock")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.counter_policy, CounterPolicy::Strict);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/vendstock"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("COUNTER_PARSING", "lenient"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.counter_policy, CounterPolicy::Lenient);
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingDatabaseUrl)));
        assert!(matches!(
            load(&[("DATABASE_URL", "x"), ("PORT", "http")]),
            Err(ConfigError::InvalidPort)
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "x"), ("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidMaxConnections)
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "x"), ("COUNTER_PARSING", "fuzzy")]),
            Err(ConfigError::InvalidCounterParsing(_))
        ));
    }
}
