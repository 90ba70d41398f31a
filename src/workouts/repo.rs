use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{NewWorkoutEntry, WorkoutEntry};

const WORKOUT_COLUMNS: &str =
    "id, user_id, activity_type, duration_minutes, calories_burned, occurred_at, created_at";

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    new: &NewWorkoutEntry,
) -> anyhow::Result<WorkoutEntry> {
    let row = sqlx::query_as::<_, WorkoutEntry>(&format!(
        r#"
        INSERT INTO workouts (user_id, activity_type, duration_minutes, calories_burned, occurred_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {WORKOUT_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&new.activity_type)
    .bind(new.duration_minutes)
    .bind(new.calories_burned)
    .bind(new.occurred_at)
    .fetch_one(db)
    .await
    .context("insert workout")?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<WorkoutEntry>> {
    let rows = sqlx::query_as::<_, WorkoutEntry>(&format!(
        r#"
        SELECT {WORKOUT_COLUMNS}
          FROM workouts
         WHERE user_id = $1
         ORDER BY occurred_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list workouts")?;
    Ok(rows)
}

/// Entries with `occurred_at` in `[start, end]`, newest first.
pub async fn list_between(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<WorkoutEntry>> {
    let rows = sqlx::query_as::<_, WorkoutEntry>(&format!(
        r#"
        SELECT {WORKOUT_COLUMNS}
          FROM workouts
         WHERE user_id = $1 AND occurred_at >= $2 AND occurred_at <= $3
         ORDER BY occurred_at DESC
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("list workouts for day")?;
    Ok(rows)
}
