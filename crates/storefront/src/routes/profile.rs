//! Creator profile route handlers.

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

use shoutout_core::{Availability, Username};

use crate::api::{ProfileData, ShoutoutOption};
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::order_form::{self, OptionView, OrderForm, OrderFormView, Submission};
use crate::services::OrderTarget;
use crate::state::AppState;

/// Creator display data for templates.
#[derive(Clone)]
pub struct CreatorView {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub is_verified: bool,
    pub rating: String,
    pub completed_shoutouts: u32,
    pub member_since: Option<String>,
}

impl From<&ProfileData> for CreatorView {
    fn from(data: &ProfileData) -> Self {
        let profile = &data.profile;
        Self {
            username: profile.username.clone(),
            display_name: profile.display_name(),
            bio: profile.bio.clone().filter(|b| !b.trim().is_empty()),
            image_url: profile.image_url().map(str::to_string),
            is_verified: profile.is_verified,
            rating: profile.rating_label(),
            completed_shoutouts: profile.completed_shoutouts,
            member_since: profile
                .created_at
                .as_deref()
                .map(filters::format_german_datetime),
        }
    }
}

impl From<&ShoutoutOption> for OptionView {
    fn from(option: &ShoutoutOption) -> Self {
        Self {
            id: option.id.to_string(),
            title: option.display_title().to_string(),
            duration: option.duration_label(),
            price: option.price_label(),
        }
    }
}

/// Query parameters for the profile page.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    /// Option to preselect in the order form.
    pub option: Option<String>,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub creator: CreatorView,
    pub availability_status: String,
    pub availability_message: String,
    pub availability_tone: String,
    pub options: Vec<OptionView>,
    pub form: OrderFormView,
}

impl ProfileTemplate {
    fn new(data: &ProfileData, state: &AppState, selected: Option<&str>) -> Self {
        let creator = CreatorView::from(data);
        let availability = data.shoutout_settings.availability();
        let options: Vec<OptionView> = data
            .sorted_options()
            .into_iter()
            .map(OptionView::from)
            .collect();
        let form = OrderFormView::new(
            format!("/{}/order", creator.username),
            options.clone(),
            selected,
            state.config().checkout_mode,
            &availability,
        );

        Self {
            creator,
            availability_status: availability.status().to_string(),
            availability_message: availability.message(),
            availability_tone: availability.tone().to_string(),
            options,
            form,
        }
    }
}

async fn load_profile(state: &AppState, raw: &str) -> Result<ProfileData> {
    let username =
        Username::parse(raw).ok_or_else(|| AppError::NotFound(format!("creator {raw}")))?;
    Ok(state.api().profile(&username).await?)
}

fn order_target(data: &ProfileData, option_id: &str) -> Option<OrderTarget> {
    let option = data.option(option_id)?;
    let username = &data.profile.username;
    Some(OrderTarget {
        creator_id: data.profile.id,
        creator_username: username.clone(),
        creator_name: data.profile.display_name(),
        option_id: option.id.clone(),
        option_title: option.display_title().to_string(),
        duration_seconds: option.duration,
        duration_label: option.duration_label(),
        price: option.price,
        back_url: format!("/{username}"),
    })
}

/// Display a creator's profile with the order form.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Result<impl IntoResponse> {
    let data = load_profile(&state, &username).await?;
    Ok(ProfileTemplate::new(&data, &state, query.option.as_deref()))
}

/// Handle the profile order form.
///
/// Redirects to checkout (payment mode) or the confirmation page (direct
/// mode); re-renders the page with an inline error otherwise.
#[instrument(skip(state, session, form))]
pub async fn order(
    State(state): State<AppState>,
    session: Session,
    Path(username): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let data = load_profile(&state, &username).await?;
    let availability: Availability = data.shoutout_settings.availability();
    let target = order_target(&data, &form.option_id);

    match order_form::submit(&state, &session, &availability, target, &form).await? {
        Submission::Done(response) => Ok(response),
        Submission::Rejected(message) => {
            let mut page = ProfileTemplate::new(&data, &state, None);
            page.form = page.form.with_submission(&form, message);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}
