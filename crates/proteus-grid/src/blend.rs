use chrono::{DateTime, Utc};

/// Bilinear interpolation over a cell's four corners `[a, b, c, d]` (A/B the lower row,
/// C/D the row above), matching the interpolation every grid accessor performs.
pub fn bilinear(corners: [f64; 4], x_frac: f64, y_frac: f64) -> f64 {
    let lower = corners[0] * (1.0 - x_frac) + corners[1] * x_frac;
    let upper = corners[2] * (1.0 - x_frac) + corners[3] * x_frac;
    lower * (1.0 - y_frac) + upper * y_frac
}

/// Linear blend between a value from the G0 snapshot and one from G1.
pub fn temporal_blend(v0: f64, v1: f64, t_frac: f64) -> f64 {
    v0 * (1.0 - t_frac) + v1 * t_frac
}

/// The fraction of the way from G0 to G1 "now" is, given the time at which G1 becomes
/// fully authoritative (`phase_time`) and the duration of a full phase. Clamped to
/// `[0, 1]`: before a refresh cycle begins blending has not started (`0`), and once
/// `phase_time` has passed G1 is fully authoritative (`1`).
pub fn phase_fraction(now: DateTime<Utc>, phase_time: DateTime<Utc>, phase_seconds: i64) -> f64 {
    let remaining = (phase_time - now).num_milliseconds() as f64 / 1000.0;
    let frac = 1.0 - remaining / (phase_seconds as f64);
    frac.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn bilinear_at_corners() {
        let corners = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(bilinear(corners, 0.0, 0.0), 1.0);
        assert_eq!(bilinear(corners, 1.0, 0.0), 2.0);
        assert_eq!(bilinear(corners, 0.0, 1.0), 3.0);
        assert_eq!(bilinear(corners, 1.0, 1.0), 4.0);
    }

    #[test]
    fn phase_fraction_clamps_at_endpoints() {
        let now = Utc::now();
        assert_eq!(phase_fraction(now, now + Duration::hours(100), 3600), 0.0);
        assert_eq!(phase_fraction(now, now - Duration::hours(100), 3600), 1.0);
    }
}
