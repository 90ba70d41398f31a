use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};

use super::aggregate::{aggregate, DailySummary};
use crate::{
    auth::{repo_types::User, AuthUser},
    calendar,
    error::{internal, ApiError},
    foods, workouts,
    state::AppState,
};

pub fn summary_routes() -> Router<AppState> {
    Router::new().route("/summary/today", get(today))
}

#[instrument(skip(state))]
pub async fn today(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DailySummary>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    let offset = state.config.utc_offset;
    let (start, end) = calendar::day_window(calendar::today(offset), offset);

    let (food_entries, workout_entries) = tokio::try_join!(
        foods::repo::list_between(&state.db, user_id, start, end),
        workouts::repo::list_between(&state.db, user_id, start, end),
    )
    .map_err(internal)?;

    let summary = aggregate(&food_entries, &workout_entries, user.profile().goal);
    info!(
        %user_id,
        consumed = summary.consumed_calories,
        burned = summary.burned_calories,
        net = summary.net_calories,
        "daily summary"
    );
    Ok(Json(summary))
}
