use serde::Serialize;

use super::advice::{advise, Goal};
use crate::foods::repo_types::FoodEntry;
use crate::rounding::round_to_int;
use crate::workouts::repo_types::WorkoutEntry;

/// One user's day: totals, counts and advice.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailySummary {
    pub consumed_calories: i64,
    pub burned_calories: i64,
    pub net_calories: i64,
    pub food_entry_count: usize,
    pub workout_entry_count: usize,
    pub goal: Option<Goal>,
    pub advice: Vec<String>,
}

/// Unrounded sums; advice rules read these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub consumed: f64,
    pub burned: f64,
}

impl Totals {
    pub fn of(foods: &[FoodEntry], workouts: &[WorkoutEntry]) -> Self {
        Self {
            consumed: foods.iter().map(FoodEntry::total_calories).sum(),
            burned: workouts.iter().map(|w| w.calories_burned).sum(),
        }
    }

    pub fn net(&self) -> f64 {
        self.consumed - self.burned
    }
}

/// Entries must already be limited to one user and one day.
pub fn aggregate(foods: &[FoodEntry], workouts: &[WorkoutEntry], goal: Option<Goal>) -> DailySummary {
    let totals = Totals::of(foods, workouts);
    let consumed_calories = round_to_int(totals.consumed);
    let burned_calories = round_to_int(totals.burned);
    DailySummary {
        consumed_calories,
        burned_calories,
        net_calories: consumed_calories - burned_calories,
        food_entry_count: foods.len(),
        workout_entry_count: workouts.len(),
        goal,
        advice: advise(goal, totals.net(), totals.consumed, totals.burned),
    }
}
