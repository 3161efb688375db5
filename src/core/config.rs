use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const ALPHA_VANTAGE_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinGeckoProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlphaVantageProviderConfig {
    pub base_url: String,
    #[serde(default = "default_alpha_vantage_key")]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyApiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub coingecko: Option<CoinGeckoProviderConfig>,
    pub alpha_vantage: Option<AlphaVantageProviderConfig>,
    pub currency_api: Option<CurrencyApiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            coingecko: Some(CoinGeckoProviderConfig {
                base_url: "https://api.coingecko.com".to_string(),
            }),
            alpha_vantage: Some(AlphaVantageProviderConfig {
                base_url: "https://www.alphavantage.co".to_string(),
                api_key: default_alpha_vantage_key(),
            }),
            currency_api: Some(CurrencyApiProviderConfig {
                base_url: "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest"
                    .to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn coingecko_url(&self) -> &str {
        self.coingecko
            .as_ref()
            .map_or("https://api.coingecko.com", |p| &p.base_url)
    }

    pub fn alpha_vantage_url(&self) -> &str {
        self.alpha_vantage
            .as_ref()
            .map_or("https://www.alphavantage.co", |p| &p.base_url)
    }

    /// The environment variable wins over the file so keys stay out of configs.
    pub fn alpha_vantage_key(&self) -> String {
        std::env::var(ALPHA_VANTAGE_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.alpha_vantage.as_ref().map(|p| p.api_key.clone()))
            .unwrap_or_else(default_alpha_vantage_key)
    }

    pub fn currency_api_url(&self) -> &str {
        self.currency_api.as_ref().map_or(
            "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest",
            |p| &p.base_url,
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_max_coin_ids")]
    pub max_coin_ids: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            currency: default_currency(),
            max_coin_ids: default_max_coin_ids(),
        }
    }
}

fn default_currency() -> String {
    "inr".to_string()
}

fn default_max_coin_ids() -> usize {
    10_000
}

fn default_alpha_vantage_key() -> String {
    "demo".to_string()
}

impl AppConfig {
    /// Loads the config from the default location, or falls back to built-in
    /// defaults when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "tradeserver", "tradeserver")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
