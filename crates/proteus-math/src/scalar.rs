//! Scalar unit conversions shared across the grid subsystems.

/// Smallest difference treated as zero when collapsing a vector's angle onto a cardinal
/// direction.
pub const EPSILON: f64 = 0.00000001;

const M_IN_NAUTICAL_MILE: f64 = 1852.0;

/// Converts meters to nautical miles.
pub fn m2nm(m: f64) -> f64 {
    m / M_IN_NAUTICAL_MILE
}

/// Converts nautical miles to meters.
pub fn nm2m(nm: f64) -> f64 {
    nm * M_IN_NAUTICAL_MILE
}

/// Converts degrees to radians.
pub fn deg2rad(deg: f64) -> f64 {
    deg / (180.0 / std::f64::consts::PI)
}

/// Converts radians to degrees.
pub fn rad2deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Converts a north/south displacement in meters to a change in latitude degrees at the
/// given latitude, using the WGS-84 length-of-a-degree-of-latitude series.
pub fn m2dlat(m: f64, lat: f64) -> f64 {
    let phi = deg2rad(lat);
    m / (111132.92 - 559.82 * (2.0 * phi).cos() + 1.175 * (4.0 * phi).cos()
        - 0.0023 * (6.0 * phi).cos())
}

/// Converts an east/west displacement in meters to a change in longitude degrees at the
/// given latitude, using the WGS-84 length-of-a-degree-of-longitude series.
pub fn m2dlon(m: f64, lat: f64) -> f64 {
    let phi = deg2rad(lat);
    m / (111412.84 * phi.cos() - 93.5 * (3.0 * phi).cos() + 0.118 * (5.0 * phi).cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nm_round_trip() {
        let nm = 12.5;
        assert!((m2nm(nm2m(nm)) - nm).abs() < 1e-9);
    }

    #[test]
    fn deg_rad_round_trip() {
        let deg = 57.3;
        assert!((rad2deg(deg2rad(deg)) - deg).abs() < 1e-9);
    }

    #[test]
    fn m2dlat_at_equator_is_close_to_nominal() {
        // One degree of latitude is roughly 111.3 km everywhere.
        let dlat = m2dlat(111320.0, 0.0);
        assert!((dlat - 1.0).abs() < 0.01);
    }
}
