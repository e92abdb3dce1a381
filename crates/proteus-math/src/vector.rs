use crate::scalar::{deg2rad, rad2deg, EPSILON};

/// A magnitude/angle vector in the local tangent plane: `angle` is degrees clockwise from
/// true north (the compass convention used throughout proteus), `mag` is in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoVec {
    pub angle: f64,
    pub mag: f64,
}

impl GeoVec {
    pub fn new(angle: f64, mag: f64) -> Self {
        GeoVec { angle, mag }
    }

    /// Vector sum of `self` and `other`, returned as a new magnitude/angle pair.
    ///
    /// Mirrors `proteus_GeoVec_add`: both vectors are resolved into east/north
    /// components, summed, and converted back to magnitude/angle form. When the
    /// resultant north component is within [`EPSILON`] of zero the angle collapses onto
    /// a cardinal direction (east/west/north) rather than risking a noisy `atan`.
    pub fn add(&self, other: &GeoVec) -> GeoVec {
        let (dx, dy) = [*self, *other].iter().fold((0.0, 0.0), |(dx, dy), v| {
            let rad = deg2rad(v.angle);
            (dx + v.mag * rad.sin(), dy + v.mag * rad.cos())
        });

        let mag = (dx * dx + dy * dy).sqrt();
        let angle = angle_from_components(dx, dy);

        GeoVec { angle, mag }
    }
}

/// Recovers a compass angle (degrees clockwise from north) from east/north components,
/// collapsing onto a cardinal direction when the north component is within [`EPSILON`]
/// of zero. This is the angle half of `proteus_GeoVec_add`'s math, factored out because
/// the ocean and weather grids each apply the same component-to-angle conversion
/// directly to their current/wind vectors rather than routing through a `GeoVec::add`.
pub fn angle_from_components(dx: f64, dy: f64) -> f64 {
    if dy.abs() < EPSILON {
        if dx < -EPSILON {
            270.0
        } else if dx > EPSILON {
            90.0
        } else {
            0.0
        }
    } else {
        let mut a = rad2deg((dx / dy).atan());
        if dy < 0.0 {
            a += 180.0;
        } else if dx < 0.0 {
            a += 360.0;
        }
        a
    }
}
