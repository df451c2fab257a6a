//! # pay-api
//!
//! HTTP API layer for pay-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Endpoints the front-end uses to list packages and start payments
//! - Static hosting for the front-end bundle
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/config` | Publishable key |
//! | GET | `/products` | List packages |
//! | POST | `/create-payment-intent` | Create payment intent |
//! | GET | `/test` | API liveness message |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
