//! REST API Server Module
//!
//! This module exposes the quoting contract over HTTP: `POST /getOrder`
//! returns an executable quote and `GET /health` reports liveness. Error
//! responses carry a status code and an empty body; the cause is logged
//! server-side.

// Order endpoint handlers and server plumbing
mod order;

// Re-export ApiServer for convenience
pub use order::ApiServer;
