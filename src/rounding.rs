//! Rounding used at output boundaries. Halves round towards positive
//! infinity so that `-150.5` becomes `-150`, the same on both sides of zero.

pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round_to_int(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// One decimal place, used for macro grams.
pub fn round_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
