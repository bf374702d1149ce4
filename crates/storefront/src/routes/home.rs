//! Home page route handler.
//!
//! The storefront has no catalog of its own; creators share direct links to
//! their profile. The home page only offers the order status lookup.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use shoutout_core::OrderNumber;

use crate::filters;

/// Query parameters of the lookup form.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub number: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub number: String,
    pub error: Option<String>,
}

/// Display the home page.
#[instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        number: String::new(),
        error: None,
    }
}

/// Send the lookup form to the status page of the entered order.
#[instrument]
pub async fn lookup(Query(query): Query<LookupQuery>) -> Response {
    match OrderNumber::parse(&query.number) {
        Some(number) => Redirect::to(&format!("/order/{number}")).into_response(),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            HomeTemplate {
                number: query.number,
                error: Some("Bitte gib eine gültige Bestellnummer ein.".to_string()),
            },
        )
            .into_response(),
    }
}
