use axum::extract::{Json, State, rejection::JsonRejection};
use axum::http::StatusCode;
use axum::response::Response;
use tracing::instrument;

use super::structs::{AppearanceDetailView, CreateAppearanceRequest};
use crate::handlers::utils::json_response;
use crate::models::{Appearance, Episode, Guest, NewAppearance, Rating};
use crate::{AppContext, db, error::ApiError};

#[instrument(skip(ctx))]
pub async fn handler(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateAppearanceRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    tracing::info!("create_appearance");

    let Json(body) = body.map_err(|e| {
        tracing::warn!("invalid appearance payload: {e}");
        ApiError::Validation
    })?;

    // the rating is checked before either reference is looked up
    let rating = Rating::new(body.rating)?;
    let record = NewAppearance::new(rating, body.episode_id, body.guest_id);

    let view = db::transaction(ctx.pool(), move |conn| {
        let episode = Episode::find(conn, record.episode_id())?
            .ok_or(ApiError::Validation)?;
        let guest =
            Guest::find(conn, record.guest_id())?.ok_or(ApiError::Validation)?;

        let appearance = Appearance::create(conn, &record)?;

        Ok(AppearanceDetailView::from((appearance, episode, guest)))
    })
    .await?;

    json_response(&ctx, StatusCode::CREATED, &view)
}
