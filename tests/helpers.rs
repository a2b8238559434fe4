//! Shared test helpers for unit tests
//!
//! This module provides configuration builders and dummy request constants
//! used by the integration tests.

use order_server::config::{Config, PairRateConfig};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Dummy maker address (EVM format, 20 bytes)
pub const DUMMY_MAKER_ADDR: &str = "0x0000000000000000000000000000000000000001";

/// Dummy taker address (EVM format, 20 bytes)
pub const DUMMY_TAKER_ADDR: &str = "0x0000000000000000000000000000000000000002";

/// Dummy maker-side token symbol
#[allow(dead_code)]
pub const DUMMY_MAKER_TOKEN: &str = "WETH";

/// Dummy taker-side token symbol
#[allow(dead_code)]
pub const DUMMY_TAKER_TOKEN: &str = "DAI";

// ============================================================================
// CONFIGURATION BUILDERS
// ============================================================================

/// Build a default test configuration (port 5004, rate 0.5, 300 s window).
pub fn build_test_config() -> Config {
    Config::default()
}

/// Build a test configuration with a pair-specific rate override.
#[allow(dead_code)]
pub fn build_test_config_with_pair_rate(
    maker_token: &str,
    taker_token: &str,
    rate: f64,
) -> Config {
    let mut config = Config::default();
    config.pricing.pairs.push(PairRateConfig {
        maker_token: maker_token.to_string(),
        taker_token: taker_token.to_string(),
        rate,
    });
    config
}
