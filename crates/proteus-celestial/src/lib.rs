mod catalog;
mod coords;

pub use catalog::{CelestialObject, STAR_EPH_J2000};
pub use coords::{
    convert_equatorial_to_horizontal, equatorial_for_object, julian_day_for_time,
    EquatorialCoord, HorizontalCoord,
};
