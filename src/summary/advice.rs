use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the user is aiming for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Loss,
    Gain,
    Maintain,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Loss => "loss",
            Goal::Gain => "gain",
            Goal::Maintain => "maintain",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown goal {0:?}")]
pub struct UnknownGoal(pub String);

impl FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loss" => Ok(Goal::Loss),
            "gain" => Ok(Goal::Gain),
            "maintain" => Ok(Goal::Maintain),
            other => Err(UnknownGoal(other.to_string())),
        }
    }
}

pub const DEFICIT_ACHIEVED: &str = "Great job! You have a calorie deficit today.";
pub const DEFICIT_TOO_AGGRESSIVE: &str =
    "Your deficit is very high. Consider eating a bit more to maintain energy.";
pub const INCREASE_ACTIVITY: &str =
    "Try to increase your physical activity to boost calorie burn.";
pub const REDUCE_PORTIONS: &str =
    "Consider reducing portion sizes to stay within your calorie goals.";
pub const SURPLUS_SUPPORTS_GAIN: &str =
    "Good! You have a calorie surplus to support muscle gain.";
pub const EAT_MORE: &str = "Try to consume more calories to support your weight gain goals.";
pub const ADEQUATE_PROTEIN: &str = "Ensure you are getting enough protein for muscle building.";
pub const WELL_BALANCED: &str = "Perfect! Your calories are well-balanced for maintenance.";
pub const SLIGHT_DEFICIT: &str = "You have a slight deficit. Consider eating a bit more.";
pub const SLIGHT_SURPLUS: &str = "You have a slight surplus. Consider reducing intake slightly.";
pub const KEEP_TRACKING: &str = "Keep up the good work! Stay consistent with your tracking.";

/// Rule-based guidance for one day. Rules for the goal fire in a fixed
/// order and may stack; when none fires the list holds the tracking
/// reminder, so it is never empty. Values are unrounded.
pub fn advise(goal: Option<Goal>, net: f64, consumed: f64, burned: f64) -> Vec<String> {
    let mut advice: Vec<&'static str> = Vec::new();

    match goal {
        Some(Goal::Loss) => {
            if net > 0.0 {
                advice.push(DEFICIT_ACHIEVED);
            }
            if net < -500.0 {
                advice.push(DEFICIT_TOO_AGGRESSIVE);
            }
            if burned < 200.0 {
                advice.push(INCREASE_ACTIVITY);
            }
            if consumed > 2500.0 {
                advice.push(REDUCE_PORTIONS);
            }
        }
        Some(Goal::Gain) => {
            if net < -300.0 {
                advice.push(SURPLUS_SUPPORTS_GAIN);
            }
            if net > 0.0 {
                advice.push(EAT_MORE);
            }
            advice.push(ADEQUATE_PROTEIN);
        }
        Some(Goal::Maintain) => {
            if net.abs() < 200.0 {
                advice.push(WELL_BALANCED);
            }
            if net > 300.0 {
                advice.push(SLIGHT_DEFICIT);
            }
            if net < -300.0 {
                advice.push(SLIGHT_SURPLUS);
            }
        }
        None => {}
    }

    if advice.is_empty() {
        advice.push(KEEP_TRACKING);
    }

    advice.into_iter().map(str::to_string).collect()
}
