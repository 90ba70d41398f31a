use serde::{Deserialize, Serialize};

/// Request body for a nutrition search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub food_name: String,
    #[serde(default = "default_quantity")]
    pub quantity_grams: f64,
}

fn default_quantity() -> f64 {
    100.0
}

/// Request body for a burn estimate.
#[derive(Debug, Deserialize)]
pub struct CalculateWorkoutRequest {
    pub activity_type: String,
    pub duration_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct CalculateWorkoutResponse {
    pub activity_type: String,
    pub duration_minutes: f64,
    pub calories_burned: i64,
    pub body_weight_kg: f64,
}
