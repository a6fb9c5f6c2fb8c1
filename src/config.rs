use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV file with listings; the embedded reference dataset is used when unset
    #[serde(default)]
    pub listings_path: Option<PathBuf>,

    /// Make `roi`, `area` and `cost` mandatory on the search endpoint
    #[serde(default)]
    pub require_all_params: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            listings_path: None,
            require_all_params: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.listings_path, None);
        assert!(!config.require_all_params);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8000"),
            ("LISTINGS_PATH", "/srv/data/properties.csv"),
            ("REQUIRE_ALL_PARAMS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(
            config.listings_path,
            Some(PathBuf::from("/srv/data/properties.csv"))
        );
        assert!(config.require_all_params);
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::from_vars(vars(&[("PORT", "http")])).is_err());
    }
}
