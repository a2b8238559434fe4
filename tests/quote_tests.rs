//! Unit tests for the quoting engine
//!
//! These tests exercise the quoting core without the HTTP layer: amount
//! computation, expiration stamping, nonce issuance, and the error taxonomy.

use std::sync::Arc;

use order_server::config::PricingConfig;
use order_server::nonce::{NonceSource, RandomNonceSource, SequentialNonceSource, NONCE_BOUND};
use order_server::pricing::PriceBook;
use order_server::quote::{OrderRequest, QuoteError, Quoter};

#[path = "mod.rs"]
mod test_helpers;
use test_helpers::{DUMMY_MAKER_TOKEN, DUMMY_TAKER_TOKEN};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Create a quoter with the default 0.5 rate and a deterministic nonce source
fn create_test_quoter() -> Quoter {
    let price_book = PriceBook::from_config(&PricingConfig::default());
    Quoter::new(price_book, Arc::new(SequentialNonceSource::default()), 300)
}

/// Create a request quoting `maker_amount` of the dummy pair
fn maker_amount_request(maker_amount: &str) -> OrderRequest {
    OrderRequest {
        maker_token: DUMMY_MAKER_TOKEN.to_string(),
        taker_token: DUMMY_TAKER_TOKEN.to_string(),
        maker_amount: maker_amount.to_string(),
        ..OrderRequest::default()
    }
}

// ============================================================================
// QUOTE COMPUTATION TESTS
// ============================================================================

/// Test that the taker amount is floor(makerAmount * rate)
/// What is tested: Amount computation and echoing
/// Why: Amounts are whole base units; fractional results must floor
#[test]
fn test_quote_computes_floor() {
    let quoter = create_test_quoter();

    let order = quoter.quote(&maker_amount_request("101")).unwrap();
    assert_eq!(order.maker_amount, "101");
    assert_eq!(order.taker_amount, "50");
    assert_eq!(order.maker_token, DUMMY_MAKER_TOKEN);
    assert_eq!(order.taker_token, DUMMY_TAKER_TOKEN);
}

/// Test that the expiration is stamped inside the validity window
/// What is tested: expiration = now + expiration_window_secs
/// Why: Clients use the absolute Unix-seconds expiration to bound execution
#[test]
fn test_quote_expiration_window() {
    let quoter = create_test_quoter();

    let before = chrono::Utc::now().timestamp();
    let order = quoter.quote(&maker_amount_request("100")).unwrap();
    let after = chrono::Utc::now().timestamp();

    assert!(order.expiration >= before + 300);
    assert!(order.expiration <= after + 300);
}

/// Test that missing amounts produce the missing-amount error
/// What is tested: QuoteError::MissingAmount for empty requests
/// Why: One amount field must be populated
#[test]
fn test_quote_missing_amount_error() {
    let quoter = create_test_quoter();

    let result = quoter.quote(&OrderRequest::default());
    assert!(matches!(result, Err(QuoteError::MissingAmount)));
}

/// Test that an unparsable maker amount produces a typed error
/// What is tested: QuoteError::InvalidMakerAmount for non-integer input
/// Why: Amounts are parsed as whole integers, not decimals
#[test]
fn test_quote_invalid_maker_amount_error() {
    let quoter = create_test_quoter();

    for bad in ["abc", "1.5", "100abc", ""] {
        let mut request = maker_amount_request(bad);
        if bad.is_empty() {
            // An empty maker amount with no taker amount is the missing case
            request.maker_amount = String::new();
            assert!(matches!(
                quoter.quote(&request),
                Err(QuoteError::MissingAmount)
            ));
        } else {
            assert!(matches!(
                quoter.quote(&request),
                Err(QuoteError::InvalidMakerAmount(_))
            ));
        }
    }
}

/// Test that taker-amount-only requests are rejected
/// What is tested: QuoteError::TakerAmountUnsupported
/// Why: No inverse pricing policy is specified; the branch must fail loudly
#[test]
fn test_quote_taker_amount_unsupported() {
    let quoter = create_test_quoter();

    let request = OrderRequest {
        taker_token: DUMMY_TAKER_TOKEN.to_string(),
        maker_token: DUMMY_MAKER_TOKEN.to_string(),
        taker_amount: "50".to_string(),
        ..OrderRequest::default()
    };
    assert!(matches!(
        quoter.quote(&request),
        Err(QuoteError::TakerAmountUnsupported)
    ));
}

// ============================================================================
// NONCE SOURCE TESTS
// ============================================================================

/// Test that random nonces stay inside the bound
/// What is tested: RandomNonceSource range
/// Why: The wire contract promises nonces in [0, NONCE_BOUND)
#[test]
fn test_random_nonce_in_range() {
    let source = RandomNonceSource;
    for _ in 0..1000 {
        assert!(source.next_nonce() < NONCE_BOUND);
    }
}

/// Test that the sequential source counts and wraps at the bound
/// What is tested: SequentialNonceSource determinism and wrapping
/// Why: Deterministic nonces let tests assert exact payloads
#[test]
fn test_sequential_nonce_wraps() {
    let source = SequentialNonceSource::starting_at(NONCE_BOUND - 1);
    assert_eq!(source.next_nonce(), NONCE_BOUND - 1);
    assert_eq!(source.next_nonce(), 0);
    assert_eq!(source.next_nonce(), 1);
}

/// Test that quotes carry nonces from the injected source
/// What is tested: Quoter uses the injected NonceSource
/// Why: Nonce issuance is a capability parameter, not a global
#[test]
fn test_quote_uses_injected_nonce_source() {
    let price_book = PriceBook::from_config(&PricingConfig::default());
    let quoter = Quoter::new(
        price_book,
        Arc::new(SequentialNonceSource::starting_at(42)),
        300,
    );

    let first = quoter.quote(&maker_amount_request("100")).unwrap();
    let second = quoter.quote(&maker_amount_request("100")).unwrap();
    assert_eq!(first.nonce, 42);
    assert_eq!(second.nonce, 43);
}
