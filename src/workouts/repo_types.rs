use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A logged workout, owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkoutEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutEntry {
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    pub occurred_at: OffsetDateTime,
}
