//! Quoting engine
//!
//! Turns an order request into an executable quote: one amount echoed, the
//! counter-amount computed from the price book, stamped with an absolute
//! expiration and a nonce.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nonce::NonceSource;
use crate::pricing::{self, PriceBook};

/// Incoming quote request from the client server.
///
/// All fields are strings on the wire; absent fields deserialize to empty
/// strings. Exactly one of `maker_amount`/`taker_amount` is expected to be
/// populated by a well-formed caller. Takers will usually request a maker
/// amount; when both are set the maker-amount case wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRequest {
    /// Participant offering the maker token (the quoting party)
    pub maker_address: String,
    /// Participant offering the taker token (the requester)
    pub taker_address: String,
    /// Asset identifier offered by the maker
    pub maker_token: String,
    /// Asset identifier offered by the taker
    pub taker_token: String,
    /// Requested taker amount in base units (decimal string, optional)
    pub taker_amount: String,
    /// Requested maker amount in base units (decimal string, optional)
    pub maker_amount: String,
}

/// Outgoing order to be signed and sent by the client server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Asset identifier offered by the maker (echoed)
    pub maker_token: String,
    /// Asset identifier offered by the taker (echoed)
    pub taker_token: String,
    /// Maker amount in base units (decimal string)
    pub maker_amount: String,
    /// Taker amount in base units (decimal string)
    pub taker_amount: String,
    /// Absolute expiration in Unix seconds
    pub expiration: i64,
    /// Quote tag in [0, NONCE_BOUND); not collision-checked
    pub nonce: u32,
}

/// Client-visible quoting failures.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Neither amount field was populated
    #[error("no maker or taker amount supplied")]
    MissingAmount,
    /// The maker amount was not a whole base-unit integer
    #[error("bad makerAmount format: {0}")]
    InvalidMakerAmount(String),
    /// Quoting from a supplied taker amount has no specified inverse policy
    #[error("quoting from takerAmount is not supported")]
    TakerAmountUnsupported,
}

/// Quoting engine shared across request handlers.
///
/// Holds the price book, the injected nonce source, and the expiration
/// window. Stateless apart from whatever state the nonce source carries.
pub struct Quoter {
    price_book: PriceBook,
    nonces: Arc<dyn NonceSource>,
    expiration_window_secs: u64,
}

impl Quoter {
    /// Creates a quoting engine.
    ///
    /// # Arguments
    ///
    /// * `price_book` - Exchange rate table
    /// * `nonces` - Nonce source (random in production, injectable for tests)
    /// * `expiration_window_secs` - Quote validity window in seconds
    pub fn new(
        price_book: PriceBook,
        nonces: Arc<dyn NonceSource>,
        expiration_window_secs: u64,
    ) -> Self {
        Self {
            price_book,
            nonces,
            expiration_window_secs,
        }
    }

    /// Quotes an order for the requested trade.
    ///
    /// Given a maker amount, the taker amount is `floor(makerAmount * rate)`
    /// with the rate taken from the price book for the requested pair. The
    /// inverse direction (quoting from a supplied taker amount) is rejected
    /// until an inverse pricing policy is specified.
    ///
    /// # Arguments
    ///
    /// * `request` - Parsed quote request
    ///
    /// # Returns
    ///
    /// - `Ok(OrderResponse)` - Executable quote with expiration and nonce
    /// - `Err(QuoteError)` - Missing or unparsable amount, or unsupported direction
    pub fn quote(&self, request: &OrderRequest) -> Result<OrderResponse, QuoteError> {
        if !request.maker_amount.is_empty() {
            let maker_amount: i64 = request
                .maker_amount
                .parse()
                .map_err(|e: std::num::ParseIntError| QuoteError::InvalidMakerAmount(e.to_string()))?;

            let rate = self
                .price_book
                .rate(&request.maker_token, &request.taker_token);
            let taker_amount = pricing::apply_rate(maker_amount, rate);

            let expiration = Utc::now().timestamp() + self.expiration_window_secs as i64;
            let nonce = self.nonces.next_nonce();

            Ok(OrderResponse {
                maker_token: request.maker_token.clone(),
                taker_token: request.taker_token.clone(),
                maker_amount: request.maker_amount.clone(),
                taker_amount: taker_amount.to_string(),
                expiration,
                nonce,
            })
        } else if !request.taker_amount.is_empty() {
            Err(QuoteError::TakerAmountUnsupported)
        } else {
            Err(QuoteError::MissingAmount)
        }
    }
}
