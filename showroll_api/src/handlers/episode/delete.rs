use axum::extract::{Path, State, rejection::PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::{AppContext, db, error::ApiError, models::Episode};

#[instrument(skip(ctx))]
pub async fn handler(
    State(ctx): State<AppContext>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    tracing::info!("delete_episode");

    let Ok(Path(record_id)) = path else {
        return Err(ApiError::NotFound("Episode"));
    };

    db::transaction(ctx.pool(), move |conn| {
        let episode = Episode::find(conn, record_id)?
            .ok_or(ApiError::NotFound("Episode"))?;

        Ok(episode.delete(conn)?)
    })
    .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
