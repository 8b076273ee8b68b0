use anyhow::Result;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub osrm_base_url: String,
    pub geocoder_base_url: String,
    pub external_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        Self::from_env_only()
    }

    /// Read environment variables without touching .env files; used by
    /// tests that control the environment directly.
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            client_base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            osrm_base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            geocoder_base_url: env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            external_timeout_secs: env::var("EXTERNAL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_secs(self.external_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 9000,
            environment: "production".to_string(),
            client_base_url: "http://localhost:3000".to_string(),
            osrm_base_url: "http://localhost:5000".to_string(),
            geocoder_base_url: "https://nominatim.openstreetmap.org".to_string(),
            external_timeout_secs: 10,
        }
    }

    #[test]
    fn server_address_joins_host_and_port() {
        assert_eq!(config().server_address(), "0.0.0.0:9000");
    }

    #[test]
    fn environment_checks() {
        let cfg = config();
        assert!(cfg.is_production());
        assert!(!cfg.is_development());
    }

    #[test]
    fn external_timeout_is_seconds() {
        assert_eq!(config().external_timeout(), Duration::from_secs(10));
    }
}
