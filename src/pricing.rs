//! Pricing policy
//!
//! Maps token pairs to exchange rates for quoting. Rates are expressed as
//! taker base units per one maker base unit; pairs without an explicit entry
//! fall back to the configured default rate, so lookup always succeeds.

use std::collections::HashMap;

use crate::config::PricingConfig;

/// Token pair identifier for rate lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPair {
    pub maker_token: String,
    pub taker_token: String,
}

/// Exchange rate table for quoting.
#[derive(Debug, Clone)]
pub struct PriceBook {
    default_rate: f64,
    pairs: HashMap<TokenPair, f64>,
}

impl PriceBook {
    /// Builds a price book from the pricing configuration.
    ///
    /// The configuration is assumed validated (positive finite rates, no
    /// duplicate pairs); see `Config::validate`.
    pub fn from_config(config: &PricingConfig) -> Self {
        let pairs = config
            .pairs
            .iter()
            .map(|entry| {
                (
                    TokenPair {
                        maker_token: entry.maker_token.clone(),
                        taker_token: entry.taker_token.clone(),
                    },
                    entry.rate,
                )
            })
            .collect();

        Self {
            default_rate: config.default_rate,
            pairs,
        }
    }

    /// Returns the rate for a token pair, falling back to the default rate.
    pub fn rate(&self, maker_token: &str, taker_token: &str) -> f64 {
        let key = TokenPair {
            maker_token: maker_token.to_string(),
            taker_token: taker_token.to_string(),
        };
        self.pairs.get(&key).copied().unwrap_or(self.default_rate)
    }
}

/// Apply an exchange rate to a whole base-unit amount, rounding down.
pub fn apply_rate(maker_amount: i64, rate: f64) -> i64 {
    (maker_amount as f64 * rate).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PairRateConfig;

    #[test]
    fn test_apply_rate_rounds_down() {
        assert_eq!(apply_rate(100, 0.5), 50);
        assert_eq!(apply_rate(101, 0.5), 50);
        assert_eq!(apply_rate(1, 0.5), 0);
    }

    #[test]
    fn test_apply_rate_floors_negative_amounts() {
        assert_eq!(apply_rate(-5, 0.5), -3);
    }

    #[test]
    fn test_rate_falls_back_to_default() {
        let book = PriceBook::from_config(&PricingConfig::default());
        assert_eq!(book.rate("WETH", "DAI"), 0.5);
    }

    #[test]
    fn test_rate_pair_override_wins() {
        let config = PricingConfig {
            default_rate: 0.5,
            pairs: vec![PairRateConfig {
                maker_token: "WETH".to_string(),
                taker_token: "DAI".to_string(),
                rate: 1800.0,
            }],
        };
        let book = PriceBook::from_config(&config);
        assert_eq!(book.rate("WETH", "DAI"), 1800.0);
        assert_eq!(book.rate("DAI", "WETH"), 0.5);
    }
}
