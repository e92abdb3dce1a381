mod csv;
mod error;
mod gzip;

pub use csv::{for_each_row, parse_f32, parse_i32};
pub use error::{IngestError, Result};
pub use gzip::read_gzip_tile;
