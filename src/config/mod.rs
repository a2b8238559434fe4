//! Configuration Management Module
//!
//! This module handles loading and managing configuration for the order
//! server. Configuration includes API bind settings, quote timing settings,
//! and the pricing table.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure containing all service settings.
///
/// This structure holds configuration for:
/// - API server bind address
/// - Quote parameters (expiration window)
/// - Pricing table (default rate and per-pair overrides)
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the built-in defaults so the server runs with zero configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration (host, port)
    #[serde(default)]
    pub api: ApiConfig,
    /// Quote parameters (expiration window)
    #[serde(default)]
    pub quote: QuoteConfig,
    /// Pricing table (default rate and per-pair overrides)
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// API server configuration for external communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host address to bind the API server to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to bind the API server to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Quote-specific configuration for timing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Validity window for issued quotes, in seconds from issue time
    #[serde(default = "default_expiration_window_secs")]
    pub expiration_window_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            expiration_window_secs: default_expiration_window_secs(),
        }
    }
}

/// Pricing table configuration.
///
/// Rates are expressed as taker base units per one maker base unit. Pairs not
/// listed under `pairs` are quoted at `default_rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Rate applied to any token pair without an explicit entry
    #[serde(default = "default_rate")]
    pub default_rate: f64,
    /// Per-pair rate overrides (use [[pricing.pairs]] in TOML for multiple)
    #[serde(default)]
    pub pairs: Vec<PairRateConfig>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_rate: default_rate(),
            pairs: Vec::new(),
        }
    }
}

/// Pricing table entry for a single token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairRateConfig {
    /// Asset identifier offered by the maker
    pub maker_token: String,
    /// Asset identifier offered by the taker
    pub taker_token: String,
    /// Taker base units per one maker base unit
    pub rate: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5004
}

fn default_expiration_window_secs() -> u64 {
    300
}

fn default_rate() -> f64 {
    0.5
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Loads configuration from the TOML file.
    ///
    /// The path is taken from the `ORDER_SERVER_CONFIG_PATH` environment
    /// variable if set (the file must then exist), otherwise from
    /// `config/order_server.toml`. If the default path does not exist the
    /// built-in defaults are used, so the server runs without any
    /// configuration file.
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - Failed to read, parse, or validate the file
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("ORDER_SERVER_CONFIG_PATH") {
            Ok(path) => Self::load_from(&path),
            Err(_) => {
                let default_path = "config/order_server.toml";
                if std::path::Path::new(default_path).exists() {
                    Self::load_from(default_path)
                } else {
                    tracing::info!(
                        "Configuration file '{}' not found, using built-in defaults",
                        default_path
                    );
                    Ok(Config::default())
                }
            }
        }
    }

    /// Loads and validates configuration from a specific TOML file path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - Failed to read, parse, or validate the file
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{}'", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file '{}'", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// This function ensures that:
    /// - The quote expiration window is nonzero
    /// - The default rate and every pair rate are positive and finite
    /// - No token pair appears twice in the pricing table
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(anyhow::Error)` - Invalid rate or duplicate pair detected
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.quote.expiration_window_secs == 0 {
            return Err(anyhow::anyhow!(
                "Configuration error: expiration_window_secs must be greater than zero"
            ));
        }

        validate_rate(self.pricing.default_rate)
            .map_err(|e| anyhow::anyhow!("Invalid default_rate: {}", e))?;

        let mut seen = std::collections::HashSet::new();
        for pair in &self.pricing.pairs {
            validate_rate(pair.rate).map_err(|e| {
                anyhow::anyhow!(
                    "Invalid rate for pair {} -> {}: {}",
                    pair.maker_token,
                    pair.taker_token,
                    e
                )
            })?;
            if !seen.insert((pair.maker_token.as_str(), pair.taker_token.as_str())) {
                return Err(anyhow::anyhow!(
                    "Configuration error: duplicate pricing pair {} -> {}",
                    pair.maker_token,
                    pair.taker_token
                ));
            }
        }

        Ok(())
    }
}

/// Validates a single exchange rate value.
///
/// # Arguments
///
/// * `rate` - Rate in taker base units per one maker base unit
///
/// # Returns
///
/// - `Ok(())` - Rate is positive and finite
/// - `Err(anyhow::Error)` - Rate is unusable for quoting
fn validate_rate(rate: f64) -> anyhow::Result<()> {
    if !rate.is_finite() {
        anyhow::bail!("rate must be finite");
    }
    if rate <= 0.0 {
        anyhow::bail!("rate must be positive");
    }
    Ok(())
}
