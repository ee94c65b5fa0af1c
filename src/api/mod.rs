//! HTTP surface of hello-service.
//!
//! The route table is three fixed GET paths, each answering with a constant
//! JSON body. Anything else falls through to axum's defaults (404 for an
//! unknown path, 405 for another method on a known path).

pub mod greeting;
pub mod health;

use axum::{routing::get, Router};

/// Build the axum router. Stateless, so it can be cloned freely.
pub fn router() -> Router {
    Router::new()
        .route("/", get(greeting::root))
        .route("/health", get(health::health))
        .route("/test", get(greeting::test_probe))
}
