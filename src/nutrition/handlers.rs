use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{
    burn::{self, DEFAULT_BODY_WEIGHT_KG},
    dto::{CalculateWorkoutRequest, CalculateWorkoutResponse, SearchRequest},
    lookup::LookupResult,
};
use crate::{
    auth::{repo_types::User, AuthUser},
    error::{bad_request, internal, ApiError},
    state::AppState,
};

pub const NOT_FOUND_MESSAGE: &str = "Nutrition information not found. Please enter manually.";

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/search", post(search))
        .route("/nutrition/calculate-workout", post(calculate_workout))
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[instrument(skip(state, payload))]
pub async fn search(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<LookupResult>, ApiError> {
    let food_name = payload.food_name.trim();
    if food_name.is_empty() {
        return Err(bad_request("Food name is required"));
    }
    if !positive(payload.quantity_grams) {
        return Err(bad_request("Quantity must be greater than zero"));
    }

    match state.nutrition.lookup(food_name, payload.quantity_grams).await {
        Some(found) => {
            info!(food = %food_name, source = ?found.source, "nutrition found");
            Ok(Json(found))
        }
        None => {
            info!(food = %food_name, "nutrition not found");
            Err((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.into()))
        }
    }
}

/// Validates the request and applies the estimator with the profile weight,
/// or the default weight when the profile has none.
pub(crate) fn estimate_burn(
    req: CalculateWorkoutRequest,
    body_weight_kg: Option<f64>,
) -> Result<CalculateWorkoutResponse, String> {
    let activity_type = req.activity_type.trim().to_string();
    if activity_type.is_empty() || !positive(req.duration_minutes) {
        return Err("Workout type and duration are required".into());
    }
    let body_weight_kg = body_weight_kg
        .filter(|w| positive(*w))
        .unwrap_or(DEFAULT_BODY_WEIGHT_KG);
    let calories_burned = burn::estimate(&activity_type, req.duration_minutes, body_weight_kg);
    Ok(CalculateWorkoutResponse {
        activity_type,
        duration_minutes: req.duration_minutes,
        calories_burned,
        body_weight_kg,
    })
}

#[instrument(skip(state, payload))]
pub async fn calculate_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CalculateWorkoutRequest>,
) -> Result<Json<CalculateWorkoutResponse>, ApiError> {
    let weight = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .and_then(|u| u.profile().body_weight_kg);
    let response = estimate_burn(payload, weight).map_err(bad_request)?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::build_app, auth::services::JwtKeys};
    use axum::{
        body::{to_bytes, Body},
        extract::FromRef,
        http::{header, Request},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    fn bearer(state: &AppState) -> String {
        let token = JwtKeys::from_ref(state)
            .sign_access(Uuid::new_v4())
            .expect("sign access");
        format!("Bearer {token}")
    }

    async fn post_search(state: AppState, auth: Option<String>, body: &str) -> (StatusCode, Vec<u8>) {
        let mut req = Request::post("/api/nutrition/search")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        let resp = build_app(state)
            .oneshot(req.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn search_hits_local_table() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let (status, body) = post_search(
            state,
            Some(auth),
            r#"{"food_name":"chicken breast","quantity_grams":100}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["calories"], 165.0);
        assert_eq!(json["protein_grams"], 31.0);
        assert_eq!(json["fat_grams"], 3.6);
        assert_eq!(json["source"], "local_table");
        assert_eq!(json["serving_size"], "100g");
    }

    #[tokio::test]
    async fn search_defaults_to_100_grams() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let (status, body) = post_search(state, Some(auth), r#"{"food_name":"apple"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["quantity_grams"], 100.0);
        assert_eq!(json["calories"], 52.0);
    }

    #[tokio::test]
    async fn search_miss_is_404() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let (status, body) =
            post_search(state, Some(auth), r#"{"food_name":"unobtainium stew"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(String::from_utf8(body).unwrap(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn search_validates_input() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let (status, _) =
            post_search(state.clone(), Some(auth.clone()), r#"{"food_name":"  "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = post_search(
            state,
            Some(auth),
            r#"{"food_name":"rice","quantity_grams":0}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_requires_token() {
        let (status, _) =
            post_search(AppState::fake(), None, r#"{"food_name":"rice"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn burn_uses_profile_weight_or_default() {
        let req = || CalculateWorkoutRequest {
            activity_type: "running".into(),
            duration_minutes: 30.0,
        };
        let with_profile = estimate_burn(req(), Some(75.0)).unwrap();
        assert_eq!(with_profile.calories_burned, 368);
        assert_eq!(with_profile.body_weight_kg, 75.0);

        let fallback = estimate_burn(req(), None).unwrap();
        assert_eq!(fallback.body_weight_kg, DEFAULT_BODY_WEIGHT_KG);
        assert_eq!(fallback.calories_burned, 343);
    }

    #[test]
    fn burn_rejects_missing_fields() {
        let blank = CalculateWorkoutRequest {
            activity_type: " ".into(),
            duration_minutes: 30.0,
        };
        assert!(estimate_burn(blank, Some(70.0)).is_err());
        let zero = CalculateWorkoutRequest {
            activity_type: "yoga".into(),
            duration_minutes: 0.0,
        };
        assert!(estimate_burn(zero, Some(70.0)).is_err());
    }
}
