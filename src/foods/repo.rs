use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{FoodEntry, NewFoodEntry};

const FOOD_COLUMNS: &str =
    "id, user_id, name, calories, protein_g, carbs_g, fat_g, servings, occurred_at, created_at";

pub async fn insert(db: &PgPool, user_id: Uuid, new: &NewFoodEntry) -> anyhow::Result<FoodEntry> {
    let row = sqlx::query_as::<_, FoodEntry>(&format!(
        r#"
        INSERT INTO food_logs (user_id, name, calories, protein_g, carbs_g, fat_g, servings, occurred_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&new.name)
    .bind(new.calories)
    .bind(new.protein_g)
    .bind(new.carbs_g)
    .bind(new.fat_g)
    .bind(new.servings)
    .bind(new.occurred_at)
    .fetch_one(db)
    .await
    .context("insert food log")?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<FoodEntry>> {
    let rows = sqlx::query_as::<_, FoodEntry>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
          FROM food_logs
         WHERE user_id = $1
         ORDER BY occurred_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list food logs")?;
    Ok(rows)
}

/// Entries with `occurred_at` in `[start, end]`, newest first.
pub async fn list_between(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<FoodEntry>> {
    let rows = sqlx::query_as::<_, FoodEntry>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
          FROM food_logs
         WHERE user_id = $1 AND occurred_at >= $2 AND occurred_at <= $3
         ORDER BY occurred_at DESC
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("list food logs for day")?;
    Ok(rows)
}
