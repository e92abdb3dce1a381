use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{IngestError, Result};

/// Reads and fully decompresses a gzip-compressed tile file.
///
/// Returns `Ok(None)` when the file does not exist -- matching `loadSquareDegree`'s
/// treatment of `ENOENT` as "assume all water" rather than a hard error -- and
/// propagates any other I/O or decompression failure.
pub fn read_gzip_tile(path: &Path) -> Result<Option<Vec<u8>>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(IngestError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut decoder = GzDecoder::new(file);
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf).map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;

    Ok(Some(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn missing_file_returns_none() {
        let path = Path::new("/nonexistent/definitely/not/here.gz");
        assert!(read_gzip_tile(path).unwrap().is_none());
    }

    #[test]
    fn round_trips_compressed_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(&[1, 2, 3, 4]).unwrap();
        encoder.finish().unwrap();

        let data = read_gzip_tile(&path).unwrap().unwrap();
        assert_eq!(data, vec![1, 2, 3, 4]);
    }
}
