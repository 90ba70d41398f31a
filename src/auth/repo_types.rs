use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::summary::advice::Goal;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub age: i32,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: String, // stored as text; see UserProfile::goal
    pub created_at: OffsetDateTime,
}

/// What the tracker core reads from a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserProfile {
    pub body_weight_kg: Option<f64>,
    /// `None` when the stored goal is not one we know.
    pub goal: Option<Goal>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            body_weight_kg: self.weight_kg.filter(|w| *w > 0.0),
            goal: self.goal.parse().ok(),
        }
    }
}

/// Insert payload for a new account.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub goal: Goal,
}

/// Partial profile update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goal: Option<Goal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(goal: &str, weight_kg: Option<f64>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Sam".into(),
            email: "sam@example.com".into(),
            password_hash: "hash".into(),
            age: 30,
            weight_kg,
            height_cm: Some(180.0),
            goal: goal.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn profile_parses_goal_and_weight() {
        let p = user("gain", Some(82.5)).profile();
        assert_eq!(p.goal, Some(Goal::Gain));
        assert_eq!(p.body_weight_kg, Some(82.5));
    }

    #[test]
    fn unknown_goal_and_missing_weight() {
        let p = user("bulk", None).profile();
        assert_eq!(p.goal, None);
        assert_eq!(p.body_weight_kg, None);
        assert_eq!(user("maintain", Some(0.0)).profile().body_weight_kg, None);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let json = serde_json::to_string(&user("loss", Some(70.0))).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("sam@example.com"));
    }
}
