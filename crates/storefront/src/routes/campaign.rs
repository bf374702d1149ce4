//! Campaign route handlers.
//!
//! A campaign bundles price options of one creator under a theme. Ordering
//! works exactly like on the profile page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shoutout_core::{CampaignId, ShoutoutOptionId};

use crate::api::{Campaign, PriceOption};
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::order_form::{self, OptionView, OrderForm, OrderFormView, Submission};
use crate::services::OrderTarget;
use crate::state::AppState;

/// Campaign display data for templates.
#[derive(Clone)]
pub struct CampaignView {
    pub id: i64,
    pub title: String,
    pub category_description: Option<String>,
    pub creator_username: String,
    pub creator_bio: Option<String>,
    pub creator_image: Option<String>,
    pub creator_verified: bool,
    pub lowest_price: Option<String>,
    pub expires_at: Option<String>,
}

impl From<&Campaign> for CampaignView {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.as_i64(),
            title: campaign.title().to_string(),
            category_description: campaign
                .category
                .as_ref()
                .map(|c| c.description.clone())
                .filter(|d| !d.trim().is_empty()),
            creator_username: campaign.user.username.clone(),
            creator_bio: campaign.user.bio.clone().filter(|b| !b.trim().is_empty()),
            creator_image: campaign
                .user
                .profile_picture
                .clone()
                .filter(|url| !url.is_empty()),
            creator_verified: campaign.user.is_verified,
            lowest_price: campaign.lowest_price().map(|p| p.display()),
            expires_at: campaign
                .expires_at
                .as_deref()
                .map(filters::format_german_datetime),
        }
    }
}

impl From<&PriceOption> for OptionView {
    fn from(option: &PriceOption) -> Self {
        Self {
            id: option.id.to_string(),
            title: "Shoutout".to_string(),
            duration: option.duration_label(),
            price: option.price_label(),
        }
    }
}

/// Query parameters for the campaign page.
#[derive(Debug, Deserialize)]
pub struct CampaignQuery {
    /// Price option to preselect.
    pub option: Option<String>,
}

/// Campaign page template.
#[derive(Template, WebTemplate)]
#[template(path = "campaign.html")]
pub struct CampaignTemplate {
    pub campaign: CampaignView,
    pub availability_status: String,
    pub availability_message: String,
    pub availability_tone: String,
    pub options: Vec<OptionView>,
    pub form: OrderFormView,
}

impl CampaignTemplate {
    fn new(campaign: &Campaign, state: &AppState, selected: Option<&str>) -> Self {
        let availability = campaign.availability();
        let options: Vec<OptionView> = campaign
            .active_options()
            .into_iter()
            .map(OptionView::from)
            .collect();
        let form = OrderFormView::new(
            format!("/campaign/{}/order", campaign.id),
            options.clone(),
            selected,
            state.config().checkout_mode,
            &availability,
        );

        Self {
            campaign: CampaignView::from(campaign),
            availability_status: availability.status().to_string(),
            availability_message: availability.message(),
            availability_tone: availability.tone().to_string(),
            options,
            form,
        }
    }
}

async fn load_campaign(state: &AppState, raw: &str) -> Result<Campaign> {
    let id: CampaignId = raw
        .parse()
        .map_err(|_| AppError::NotFound(format!("campaign {raw}")))?;
    Ok(state.api().campaign(id).await?)
}

fn order_target(campaign: &Campaign, option_id: &str) -> Option<OrderTarget> {
    let option = campaign.option(option_id.trim().parse().ok()?)?;
    Some(OrderTarget {
        creator_id: campaign.user.id,
        creator_username: campaign.user.username.clone(),
        creator_name: campaign.user.display_name(),
        option_id: ShoutoutOptionId::from(option.id),
        option_title: campaign.title().to_string(),
        duration_seconds: option.duration_seconds,
        duration_label: option.duration_label(),
        price: option.price,
        back_url: format!("/campaign/{}", campaign.id),
    })
}

/// Display a campaign with its price options.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CampaignQuery>,
) -> Result<impl IntoResponse> {
    let campaign = load_campaign(&state, &id).await?;
    Ok(CampaignTemplate::new(&campaign, &state, query.option.as_deref()))
}

/// Handle the campaign order form.
#[instrument(skip(state, session, form))]
pub async fn order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let campaign = load_campaign(&state, &id).await?;
    let availability = campaign.availability();
    let target = order_target(&campaign, &form.option_id);

    match order_form::submit(&state, &session, &availability, target, &form).await? {
        Submission::Done(response) => Ok(response),
        Submission::Rejected(message) => {
            let mut page = CampaignTemplate::new(&campaign, &state, None);
            page.form = page.form.with_submission(&form, message);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}
