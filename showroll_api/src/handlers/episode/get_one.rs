use axum::extract::{Path, State, rejection::PathRejection};
use axum::http::StatusCode;
use axum::response::Response;
use tracing::instrument;

use super::structs::EpisodeDetailView;
use crate::handlers::utils::json_response;
use crate::{AppContext, db, error::ApiError, models::Episode};

#[instrument(skip(ctx))]
pub async fn handler(
    State(ctx): State<AppContext>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    tracing::info!("get_episode");

    let Ok(Path(record_id)) = path else {
        return Err(ApiError::NotFound("Episode"));
    };

    let view = db::transaction(ctx.pool(), move |conn| {
        let episode = Episode::find(conn, record_id)?
            .ok_or(ApiError::NotFound("Episode"))?;
        let guests = episode.guests(conn)?;

        Ok(EpisodeDetailView::from((episode, guests)))
    })
    .await?;

    json_response(&ctx, StatusCode::OK, &view)
}
