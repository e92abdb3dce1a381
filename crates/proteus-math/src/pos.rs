use crate::scalar::{deg2rad, m2dlat, m2dlon};
use crate::vector::GeoVec;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPos {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPos {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPos { lat, lon }
    }

    /// Advances this position by the given vector, mirroring `proteus_GeoPos_advance`.
    ///
    /// Latitude is clamped to `[-90, 90]` once displaced; longitude wraps around the
    /// antimeridian by adding or subtracting 360 degrees rather than clamping. The two
    /// axes are intentionally not symmetric: a ship sailing past the pole stops at the
    /// pole, but one crossing the antimeridian keeps going.
    pub fn advance(&mut self, vec: &GeoVec) {
        let lat = self.lat;
        let rad = deg2rad(vec.angle);
        let vx = vec.mag * rad.sin();
        let vy = vec.mag * rad.cos();

        self.lat += m2dlat(vy, lat);
        if self.lat > 90.0 {
            self.lat = 90.0;
        } else if self.lat < -90.0 {
            self.lat = -90.0;
        }

        self.lon += m2dlon(vx, lat);
        if self.lon > 180.0 {
            self.lon -= 360.0;
        } else if self.lon < -180.0 {
            self.lon += 360.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_north_increases_latitude() {
        let mut p = GeoPos::new(0.0, 0.0);
        p.advance(&GeoVec::new(0.0, 10_000.0));
        assert!(p.lat > 0.0);
        assert!((p.lon - 0.0).abs() < 1e-9);
    }

    #[test]
    fn latitude_clamps_at_pole() {
        let mut p = GeoPos::new(89.99, 0.0);
        p.advance(&GeoVec::new(0.0, 1_000_000.0));
        assert_eq!(p.lat, 90.0);
    }

    #[test]
    fn longitude_wraps_past_antimeridian() {
        let mut p = GeoPos::new(0.0, 179.999);
        p.advance(&GeoVec::new(90.0, 10_000.0));
        assert!(p.lon < 0.0);
    }
}
