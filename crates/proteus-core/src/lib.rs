mod error;
mod log;
mod version;

pub use error::{ProteusError, Result};
pub use log::set_log_sink;
pub use version::{version, VersionInfo};
