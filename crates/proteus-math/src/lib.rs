mod pos;
mod scalar;
mod vector;

pub use pos::GeoPos;
pub use scalar::{deg2rad, m2dlat, m2dlon, m2nm, nm2m, rad2deg, EPSILON};
pub use vector::{angle_from_components, GeoVec};
