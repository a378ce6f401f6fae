use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use tracing::instrument;

use super::structs::EpisodeSimpleView;
use crate::handlers::utils::json_response;
use crate::{AppContext, db, error::ApiError, models::Episode};

#[instrument(skip(ctx))]
pub async fn handler(State(ctx): State<AppContext>) -> Result<Response, ApiError> {
    tracing::info!("get_episode_list");

    let records =
        db::transaction(ctx.pool(), |conn| Ok(Episode::all(conn)?)).await?;

    let prepared_results = records
        .into_iter()
        .map(EpisodeSimpleView::from)
        .collect::<Vec<_>>();

    json_response(&ctx, StatusCode::OK, &prepared_results)
}
