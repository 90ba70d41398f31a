use crate::rounding::round_to_int;

/// MET used when the activity matches nothing in the table.
pub const DEFAULT_MET: f64 = 5.0;

/// Body weight assumed when the profile has none.
pub const DEFAULT_BODY_WEIGHT_KG: f64 = 70.0;

/// Activity keyword and its MET value. First keyword contained in the
/// activity wins.
pub static MET_TABLE: &[(&str, f64)] = &[
    // cardio
    ("running", 9.8),
    ("jogging", 7.0),
    ("walking", 3.8),
    ("cycling", 7.5),
    ("swimming", 7.0),
    ("hiking", 6.0),
    // strength
    ("weight training", 6.0),
    ("strength training", 6.0),
    ("weightlifting", 6.0),
    ("bodyweight", 5.0),
    // sports
    ("basketball", 6.5),
    ("soccer", 7.0),
    ("tennis", 7.3),
    ("badminton", 5.5),
    ("volleyball", 4.0),
    // other
    ("yoga", 3.0),
    ("pilates", 3.5),
    ("dancing", 4.5),
    ("aerobics", 7.0),
    ("zumba", 6.5),
    ("hiit", 8.0),
];

pub fn met_for(table: &[(&str, f64)], activity_type: &str) -> f64 {
    let activity = activity_type.to_lowercase();
    table
        .iter()
        .find(|(key, _)| activity.contains(key))
        .map(|&(_, met)| met)
        .unwrap_or(DEFAULT_MET)
}

/// Estimated kcal burned: `MET × kg × hours`, rounded to the nearest integer.
pub fn estimate(activity_type: &str, duration_minutes: f64, body_weight_kg: f64) -> i64 {
    let met = met_for(MET_TABLE, activity_type);
    round_to_int(met * body_weight_kg * (duration_minutes / 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_half_hour() {
        assert_eq!(estimate("running", 30.0, 75.0), 368);
    }

    #[test]
    fn matches_keyword_inside_description() {
        assert_eq!(met_for(MET_TABLE, "Morning RUNNING intervals"), 9.8);
        assert_eq!(met_for(MET_TABLE, "HIIT session"), 8.0);
        assert_eq!(met_for(MET_TABLE, "Strength Training"), 6.0);
    }

    #[test]
    fn unknown_activity_uses_default() {
        assert_eq!(met_for(MET_TABLE, "rock climbing"), DEFAULT_MET);
        assert_eq!(estimate("rock climbing", 60.0, DEFAULT_BODY_WEIGHT_KG), 350);
    }

    #[test]
    fn first_declared_keyword_wins() {
        // contains both "walking" and "running"; running is declared first
        assert_eq!(met_for(MET_TABLE, "walking then running"), 9.8);
    }

    #[test]
    fn linear_in_duration_and_weight() {
        let base = estimate("cycling", 60.0, 70.0);
        assert_eq!(base, 525);
        assert!((estimate("cycling", 120.0, 70.0) - 2 * base).abs() <= 1);
        assert!((estimate("cycling", 60.0, 140.0) - 2 * base).abs() <= 1);
        let odd = estimate("yoga", 25.0, 61.0);
        assert!((estimate("yoga", 50.0, 61.0) - 2 * odd).abs() <= 1);
    }
}
