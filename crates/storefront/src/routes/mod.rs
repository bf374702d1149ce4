//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (order lookup)
//! GET  /order?number=          - Lookup form target, redirects to /order/{n}
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (API reachable)
//!
//! # Catalog
//! GET  /{username}             - Creator profile with order form (?option=)
//! POST /{username}/order       - Order form submit (rate limited)
//! GET  /campaign/{id}          - Campaign with order form (?option=)
//! POST /campaign/{id}/order    - Order form submit (rate limited)
//!
//! # Checkout (pending checkout in session)
//! GET  /checkout               - Payment page
//! POST /checkout/submit        - idle → processing (JSON)
//! POST /checkout/result        - Payment element outcome (JSON)
//! POST /checkout/retry         - failed → idle
//! POST /checkout/cancel        - Discard pending checkout
//!
//! # Confirmation
//! GET  /payment-success        - Provider return URL / paid order confirmation
//! GET  /success                - Direct order confirmation (?order=)
//!
//! # Order status
//! GET  /order/{orderNumber}    - Email form
//! POST /order/{orderNumber}    - Verify email and show order (rate limited)
//! ```

pub mod campaign;
pub mod checkout;
pub mod health;
pub mod home;
pub mod order_form;
pub mod order_status;
pub mod profile;
pub mod success;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{checkout_rate_limiter, order_rate_limiter};
use crate::state::AppState;

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    let limiter = checkout_rate_limiter();

    Router::new()
        .route("/", get(checkout::show))
        .route("/submit", post(checkout::submit).layer(limiter.clone()))
        .route("/result", post(checkout::result).layer(limiter.clone()))
        .route("/retry", post(checkout::retry).layer(limiter.clone()))
        .route("/cancel", post(checkout::cancel).layer(limiter))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    let order_limiter = order_rate_limiter();

    Router::new()
        // Home page and order lookup
        .route("/", get(home::home))
        .route("/order", get(home::lookup))
        .route(
            "/order/{order_number}",
            get(order_status::show)
                .merge(post(order_status::verify).layer(checkout_rate_limiter())),
        )
        // Checkout
        .nest("/checkout", checkout_routes())
        .route("/payment-success", get(success::payment_success))
        .route("/success", get(success::success))
        // Campaigns
        .route("/campaign/{id}", get(campaign::show))
        .route(
            "/campaign/{id}/order",
            post(campaign::order).layer(order_limiter.clone()),
        )
        // Creator profiles (catch-all single segment, keep last)
        .route("/{username}", get(profile::show))
        .route(
            "/{username}/order",
            post(profile::order).layer(order_limiter),
        )
}
