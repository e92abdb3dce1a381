//! Public surface of the proteus environmental sampling library.
//!
//! Each submodule wraps one grid/kernel crate and is named for the field it
//! samples, matching the grouping consumers reach for: `celestial`, `compass`,
//! `geo_info`, `wave`, `ocean`, `weather`. `GeoPos`/`GeoVec` and the library's
//! version/logging entry points live at the crate root since every subsystem
//! takes or returns them.

pub use proteus_core::{set_log_sink, version, ProteusError, Result, VersionInfo};
pub use proteus_math::{deg2rad, rad2deg, m2dlat, m2dlon, m2nm, nm2m, GeoPos, GeoVec};

/// Celestial mechanics: Julian Day conversion, Sun/star equatorial coordinates,
/// and the equatorial-to-horizontal transform with optional refraction.
pub mod celestial {
    pub use proteus_celestial::{
        convert_equatorial_to_horizontal, equatorial_for_object, julian_day_for_time,
        CelestialObject, EquatorialCoord, HorizontalCoord,
    };
}

/// Magnetic declination lookups over a yearly grid time series.
pub mod compass {
    pub use proteus_compass::CompassGrid;
}

/// Demand-paged land/water bitmap tile cache.
pub mod geo_info {
    pub use proteus_geoinfo::GeoInfoCache;
}

/// Significant wave height grid.
pub mod wave {
    pub use proteus_wave::{WaveData, WaveGrid};
}

/// Ocean surface current/temperature/salinity/ice grid.
pub mod ocean {
    pub use proteus_ocean::{OceanData, OceanGrid};
}

/// Surface weather grid (wind, gust, temperature, pressure, precipitation).
pub mod weather {
    pub use proteus_weather::{
        Resolution, Weather, WeatherGrid, COND_FRZR, COND_ICEP, COND_RAIN, COND_SNOW,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_reports_current_release() {
        let v = version();
        assert_eq!(v.as_string(), "0.1.0");
    }
}
