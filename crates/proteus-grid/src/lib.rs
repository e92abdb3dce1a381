mod blend;
mod cancel;
mod layout;
mod snapshots;
mod validity;

pub use blend::{bilinear, phase_fraction, temporal_blend};
pub use cancel::CancelToken;
pub use layout::{Corners, GridLayout, Location};
pub use snapshots::Snapshots;
pub use validity::{average_substitute, ValidityMask};
