//! Common test fixtures for environmental-sampling tests.
//!
//! This module provides pre-defined test data that represents common
//! scenarios in point-in-space/point-in-time field sampling.

/// Common bounding box definitions for testing.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// Continental United States bounding box
    pub const CONUS: (f64, f64, f64, f64) = (-130.0, 20.0, -60.0, 55.0);

    /// Europe bounding box
    pub const EUROPE: (f64, f64, f64, f64) = (-15.0, 35.0, 45.0, 72.0);

    /// A small test tile (~1 degree square)
    pub const SMALL_TILE: (f64, f64, f64, f64) = (-100.0, 40.0, -99.0, 41.0);

    /// Single point (degenerate bbox)
    pub const POINT: (f64, f64, f64, f64) = (0.0, 0.0, 0.0, 0.0);

    /// Crosses antimeridian (Pacific-centric)
    pub const PACIFIC: (f64, f64, f64, f64) = (160.0, -50.0, -140.0, 50.0);

    /// Invalid bbox (min > max)
    pub const INVALID: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

/// Grid resolution specifications matching the grids sampled across the suite.
pub mod grid {
    /// Wave grid resolution: 1.0 degree, global.
    pub const WAVE: GridSpec = GridSpec {
        width: 360,
        height: 181,
        scale: 1.0,
    };

    /// Ocean grid resolution: 0.4 degree (2.5x scale), near-global.
    pub const OCEAN: GridSpec = GridSpec {
        width: 900,
        height: 397,
        scale: 2.5,
    };

    /// Weather grid at its coarsest source resolution (1.00 degree).
    pub const WEATHER_1P00: GridSpec = GridSpec {
        width: 360,
        height: 181,
        scale: 1.0,
    };

    /// Weather grid at its medium source resolution (0.50 degree).
    pub const WEATHER_0P50: GridSpec = GridSpec {
        width: 720,
        height: 361,
        scale: 2.0,
    };

    /// Weather grid at its finest source resolution (0.25 degree).
    pub const WEATHER_0P25: GridSpec = GridSpec {
        width: 1440,
        height: 721,
        scale: 4.0,
    };

    /// A small 10x10 test grid, 1 degree cells.
    pub const SIMPLE_10X10: GridSpec = GridSpec {
        width: 10,
        height: 10,
        scale: 1.0,
    };

    /// Grid specification for testing.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub width: usize,
        pub height: usize,
        pub scale: f64,
    }

    impl GridSpec {
        /// Returns the total number of grid cells.
        pub fn size(&self) -> usize {
            self.width * self.height
        }

        /// Returns the cell resolution in degrees.
        pub fn resolution_degrees(&self) -> f64 {
            1.0 / self.scale
        }
    }
}

/// Common time values for testing.
pub mod time {
    /// A fixed reference time for tests (2024-01-15T12:00:00Z)
    pub const REFERENCE_TIME: &str = "2024-01-15T12:00:00Z";

    /// Forecast-cycle-style run times (00/06/12/18 UTC), matching the source
    /// grids' own refresh cadence.
    pub const CYCLES: [&str; 4] = ["00", "06", "12", "18"];
}

/// Literal query positions used across end-to-end scenarios, grounded in
/// known warm/cold/land/water/antimeridian cases.
pub mod points {
    /// Halifax, Nova Scotia approach (coastal, used for weather/wind scenarios).
    pub const HALIFAX: (f64, f64) = (44.5, -62.5);

    /// London (used for celestial altitude/azimuth scenarios).
    pub const LONDON: (f64, f64) = (51.478, 0.0);

    /// Warm Gulf Stream water, no ice expected.
    pub const GULF_STREAM: (f64, f64) = (40.2, -59.8);

    /// Southern Ocean, ice expected.
    pub const SOUTHERN_OCEAN: (f64, f64) = (-65.0, 70.2);

    /// Mid-continent point, over land (used for land/water and invalid-ocean cases).
    pub const CONTINENTAL_INTERIOR: (f64, f64) = (55.0, -100.0);

    /// Antimeridian crossing pair: same physical point, expressed as +180 and -180.
    pub const ANTIMERIDIAN_EAST: (f64, f64) = (-36.0, 180.0);
    pub const ANTIMERIDIAN_WEST: (f64, f64) = (-36.0, -180.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spec_size() {
        assert_eq!(grid::WEATHER_0P25.size(), 1440 * 721);
        assert_eq!(grid::SIMPLE_10X10.size(), 100);
    }

    #[test]
    fn test_grid_spec_resolution() {
        assert!((grid::WEATHER_0P25.resolution_degrees() - 0.25).abs() < 1e-9);
        assert!((grid::OCEAN.resolution_degrees() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_antimeridian_points_are_the_same_longitude() {
        assert_eq!(points::ANTIMERIDIAN_EAST.0, points::ANTIMERIDIAN_WEST.0);
        assert_eq!(points::ANTIMERIDIAN_EAST.1.abs(), points::ANTIMERIDIAN_WEST.1.abs());
    }

    #[test]
    fn test_bbox_pacific_crosses_antimeridian() {
        let (min_lon, _, max_lon, _) = bbox::PACIFIC;
        assert!(min_lon > max_lon);
    }
}
