//! Maker Order Server Library
//!
//! This crate provides an example order server for a liquidity provider
//! ("maker"). A single quoting endpoint accepts a trade request, computes the
//! counter-amount from a configured price book, and returns an order payload
//! stamped with an expiration and a nonce, ready for the requesting client
//! to sign and submit.
//!
//! The server holds no private keys and performs no signing or settlement.

pub mod api;
pub mod config;
pub mod nonce;
pub mod pricing;
pub mod quote;

// Re-export commonly used types
pub use config::{ApiConfig, Config, PairRateConfig, PricingConfig, QuoteConfig};
pub use nonce::{NonceSource, RandomNonceSource, SequentialNonceSource, NONCE_BOUND};
pub use pricing::PriceBook;
pub use quote::{OrderRequest, OrderResponse, QuoteError, Quoter};
