use serde::Deserialize;
use time::OffsetDateTime;

use super::repo_types::NewWorkoutEntry;
use crate::error::at_least;

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub occurred_at: Option<OffsetDateTime>,
}

impl CreateWorkoutRequest {
    pub fn validate(self, now: OffsetDateTime) -> Result<NewWorkoutEntry, String> {
        let activity_type = self.activity_type.trim().to_string();
        if activity_type.is_empty() {
            return Err("Workout type is required".into());
        }
        if self.duration_minutes < 1 {
            return Err("Duration must be at least 1 minute".into());
        }
        if !at_least(self.calories_burned, 0.0) {
            return Err("Calories burned must be a positive number".into());
        }
        Ok(NewWorkoutEntry {
            activity_type,
            duration_minutes: self.duration_minutes,
            calories_burned: self.calories_burned,
            occurred_at: self.occurred_at.unwrap_or(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn accepts_and_defaults_time() {
        let req: CreateWorkoutRequest = serde_json::from_str(
            r#"{"activity_type":" Yoga ","duration_minutes":45,"calories_burned":158}"#,
        )
        .unwrap();
        let now = datetime!(2024-06-01 18:00 UTC);
        let entry = req.validate(now).unwrap();
        assert_eq!(entry.activity_type, "Yoga");
        assert_eq!(entry.occurred_at, now);
    }

    #[test]
    fn duration_must_be_whole_minutes() {
        let parsed = serde_json::from_str::<CreateWorkoutRequest>(
            r#"{"activity_type":"run","duration_minutes":12.5,"calories_burned":1}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        let now = OffsetDateTime::now_utc();
        let make = |activity: &str, minutes: i32, kcal: f64| CreateWorkoutRequest {
            activity_type: activity.into(),
            duration_minutes: minutes,
            calories_burned: kcal,
            occurred_at: None,
        };
        assert_eq!(make("", 10, 1.0).validate(now).unwrap_err(), "Workout type is required");
        assert_eq!(
            make("swim", 0, 1.0).validate(now).unwrap_err(),
            "Duration must be at least 1 minute"
        );
        assert_eq!(
            make("swim", 10, -5.0).validate(now).unwrap_err(),
            "Calories burned must be a positive number"
        );
        assert!(make("swim", 1, 0.0).validate(now).is_ok());
    }
}
