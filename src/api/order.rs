//! Order endpoint handlers
//!
//! This module contains the HTTP server, the `/getOrder` quote handler, and
//! the rejection mapping that implements the wire contract: 200 with a JSON
//! order on success, a bare 4xx/5xx status with an empty body on failure.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::nonce::{NonceSource, RandomNonceSource};
use crate::pricing::PriceBook;
use crate::quote::{OrderRequest, QuoteError, Quoter};

impl warp::reject::Reject for QuoteError {}

/// Health probe payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

// ============================================================================
// WARP FILTER HELPERS
// ============================================================================

/// Creates a warp filter that provides access to the quoting engine.
///
/// # Arguments
///
/// * `quoter` - The shared quoting engine
///
/// # Returns
///
/// A warp filter that provides the quoter to handlers
fn with_quoter(
    quoter: Arc<Quoter>,
) -> impl Filter<Extract = (Arc<Quoter>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || quoter.clone())
}

// ============================================================================
// REQUEST HANDLERS
// ============================================================================

/// Handle `POST /getOrder` quote requests.
///
/// # Arguments
///
/// * `request` - Parsed quote request body
/// * `quoter` - Shared quoting engine
///
/// # Returns
///
/// - `Ok(reply)` - JSON order payload
/// - `Err(rejection)` - Quoting failure, mapped to a status by `handle_rejection`
async fn get_order_handler(
    request: OrderRequest,
    quoter: Arc<Quoter>,
) -> Result<impl Reply, Rejection> {
    let order = quoter.quote(&request).map_err(warp::reject::custom)?;

    info!(
        "Sending order: {} {} -> {} {} (expiration {}, nonce {})",
        order.maker_amount,
        order.maker_token,
        order.taker_amount,
        order.taker_token,
        order.expiration,
        order.nonce
    );

    Ok(warp::reply::json(&order))
}

// ============================================================================
// REJECTION HANDLER
// ============================================================================

/// Global rejection handler for all API routes.
///
/// Maps rejections to the wire contract: client faults are 400 (including a
/// wrong request method), the unimplemented taker-amount direction is 501,
/// unknown paths are 404, and everything else is 500. Error responses carry
/// no body; the cause is logged here.
///
/// # Arguments
///
/// * `rej` - The warp rejection to handle
///
/// # Returns
///
/// A warp reply with the mapped status and an empty body
async fn handle_rejection(rej: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let status = if let Some(err) = rej.find::<QuoteError>() {
        warn!("bad request: {}", err);
        match err {
            QuoteError::TakerAmountUnsupported => StatusCode::NOT_IMPLEMENTED,
            QuoteError::MissingAmount | QuoteError::InvalidMakerAmount(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    } else if let Some(err) = rej.find::<warp::filters::body::BodyDeserializeError>() {
        warn!("bad request: {}", err);
        StatusCode::BAD_REQUEST
    } else if rej.find::<warp::reject::UnsupportedMediaType>().is_some() {
        warn!("bad request: unsupported media type");
        StatusCode::BAD_REQUEST
    } else if rej.find::<warp::reject::MethodNotAllowed>().is_some() {
        warn!("bad request method");
        StatusCode::BAD_REQUEST
    } else if rej.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        error!("Unhandled rejection: {:?}", rej);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok(warp::reply::with_status(warp::reply(), status))
}

// ============================================================================
// API SERVER IMPLEMENTATION
// ============================================================================

/// REST API server for the maker order server.
///
/// Exposes the quoting endpoint to relayer/client peers. The server holds no
/// private keys; the returned order is signed by the requesting client.
pub struct ApiServer {
    /// Service configuration
    config: Arc<Config>,
    /// Quoting engine shared across handlers
    quoter: Arc<Quoter>,
}

impl ApiServer {
    /// Creates a server with the production random nonce source.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    pub fn new(config: Config) -> Self {
        Self::with_nonce_source(config, Arc::new(RandomNonceSource))
    }

    /// Creates a server with an injected nonce source.
    ///
    /// Used by tests to make issued nonces deterministic.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    /// * `nonces` - Nonce source used for issued quotes
    pub fn with_nonce_source(config: Config, nonces: Arc<dyn NonceSource>) -> Self {
        let price_book = PriceBook::from_config(&config.pricing);
        let quoter = Quoter::new(price_book, nonces, config.quote.expiration_window_secs);

        Self {
            config: Arc::new(config),
            quoter: Arc::new(quoter),
        }
    }

    /// Starts the API server and begins handling HTTP requests.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Server stopped cleanly
    /// - `Err(anyhow::Error)` - Failed to parse the bind address
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting order server on {}:{}",
            self.config.api.host, self.config.api.port
        );

        let routes = self.create_routes();

        let addr: std::net::SocketAddr =
            format!("{}:{}", self.config.api.host, self.config.api.port)
                .parse()
                .context("Failed to parse API server address")?;

        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Creates all API routes for the server.
    ///
    /// # Returns
    ///
    /// A warp filter containing all API routes
    pub(crate) fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let quoter = self.quoter.clone();

        // Health check endpoint - returns service status
        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::json(&HealthResponse { status: "ok" }));

        // Quote endpoint - computes the counter-amount and stamps the order
        let get_order = warp::path("getOrder")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(with_quoter(quoter))
            .and_then(get_order_handler);

        health.or(get_order).recover(handle_rejection)
    }

    /// Public method for testing - exposes routes for integration tests
    #[allow(dead_code)] // Used by tests
    pub fn test_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        self.create_routes()
    }
}
