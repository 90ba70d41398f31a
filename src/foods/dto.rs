use serde::Deserialize;
use time::OffsetDateTime;

use super::repo_types::NewFoodEntry;
use crate::error::at_least;

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub servings: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub occurred_at: Option<OffsetDateTime>,
}

pub const MIN_SERVINGS: f64 = 0.1;

impl CreateFoodRequest {
    /// Checks field ranges and fills defaults (1 serving, now).
    pub fn validate(self, now: OffsetDateTime) -> Result<NewFoodEntry, String> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("Food name is required".into());
        }
        for (value, label) in [
            (self.calories, "Calories"),
            (self.protein_g, "Protein"),
            (self.carbs_g, "Carbs"),
            (self.fat_g, "Fat"),
        ] {
            if !at_least(value, 0.0) {
                return Err(format!("{label} must be a positive number"));
            }
        }
        let servings = self.servings.unwrap_or(1.0);
        if !at_least(servings, MIN_SERVINGS) {
            return Err("Servings must be at least 0.1".into());
        }
        Ok(NewFoodEntry {
            name,
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            servings,
            occurred_at: self.occurred_at.unwrap_or(now),
        })
    }
}
