//! Numeric helpers centralizing the rounding and clamping used by score math.

use num_traits::cast::cast;

/// Round an f64 to the nearest integer, clamped to the i32 range.
/// NaN maps to 0.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    cast::<f64, i32>(value.clamp(min, max).round()).unwrap_or(0)
}

/// Convert an i64 into f64, allowing precision loss in one audited place.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Clamp a raw mission score into the valid [0, 100] band.
#[must_use]
pub fn clamp_score(value: i32) -> i32 {
    value.clamp(0, 100)
}

/// Integer percentage of `points` against `max`, rounded and clamped to
/// [0, 100]. A zero `max` yields 0; callers reject that case at setup.
#[must_use]
pub fn percent_of(points: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let pct = round_f64_to_i32(f64::from(points) * 100.0 / f64::from(max));
    u8::try_from(pct.clamp(0, 100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_covers_edges() {
        assert_eq!(round_f64_to_i32(1.6), 2);
        assert_eq!(round_f64_to_i32(-0.5), -1);
        assert_eq!(round_f64_to_i32(f64::NAN), 0);
        assert_eq!(round_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn score_clamping() {
        assert_eq!(clamp_score(-10), 0);
        assert_eq!(clamp_score(150), 100);
        assert_eq!(clamp_score(73), 73);
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent_of(30, 100), 30);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(250, 100), 100);
        assert_eq!(percent_of(5, 0), 0);
    }
}
