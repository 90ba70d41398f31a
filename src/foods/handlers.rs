use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{dto::CreateFoodRequest, repo, repo_types::FoodEntry};
use crate::{
    auth::AuthUser,
    calendar,
    error::{bad_request, internal, ApiError},
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/food", post(create_food).get(list_food))
        .route("/food/:date", get(list_food_for_day))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodEntry>), ApiError> {
    let new = payload
        .validate(OffsetDateTime::now_utc())
        .map_err(bad_request)?;
    let entry = repo::insert(&state.db, user_id, &new)
        .await
        .map_err(internal)?;
    info!(%user_id, food_id = %entry.id, name = %entry.name, "food logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<FoodEntry>>, ApiError> {
    let rows = repo::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn list_food_for_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<Vec<FoodEntry>>, ApiError> {
    let day = calendar::parse_day(&date).ok_or_else(|| bad_request("Date must be YYYY-MM-DD"))?;
    let (start, end) = calendar::day_window(day, state.config.utc_offset);
    let rows = repo::list_between(&state.db, user_id, start, end)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}
