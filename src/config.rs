use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    /// Defaults for everything except the database file.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Config {
            database_path: database_path.into(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            max_body_size: 65_536,
            log_level: "info".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let database_path = PathBuf::from(env_or("GW_CLOCK_DATABASE_PATH", "db.db"));

        let host: IpAddr = env_or("GW_CLOCK_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid GW_CLOCK_HOST: {e}"))?;

        let port: u16 = env_or("GW_CLOCK_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid GW_CLOCK_PORT: {e}"))?;

        let max_body_size: usize = env_or("GW_CLOCK_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid GW_CLOCK_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("GW_CLOCK_LOG_LEVEL", "info");

        Ok(Config {
            database_path,
            host,
            port,
            max_body_size,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
