use std::path::Path;

use proteus_core::ProteusError;
use proteus_grid::GridLayout;

pub const GRID_X: i32 = 360;
pub const GRID_Y: i32 = 181;

pub const LAYOUT: GridLayout = GridLayout {
    nx: GRID_X,
    ny: GRID_Y,
    offset_x: 180.0,
    offset_y: 90.0,
    scale: 1.0,
};

/// 11 hours, 58 minutes.
pub const PHASE_SECONDS: i64 = 11 * 3600 + 58 * 60;

/// Wave height in meters; negative values mark an unfilled cell as invalid. `-1.0`
/// plays the role of the original C grid's freshly-`memset` sentinel bytes -- any
/// negative height is treated as "no data" by [`super::WaveGrid::get`].
const INVALID: f32 = -1.0;

pub fn is_valid(height: f32) -> bool {
    height >= 0.0
}

/// Loads a wave grid from `path`, starting from `seed` (the previous leading snapshot,
/// when this is a live refresh) or an all-invalid grid (on first load).
pub fn load_grid(path: &Path, seed: Option<&[f32]>) -> Result<Vec<f32>, ProteusError> {
    let mut grid = match seed {
        Some(seed) => seed.to_vec(),
        None => vec![INVALID; LAYOUT.len()],
    };

    proteus_ingest::for_each_row(path, |line, fields| {
        if fields.len() != 3 {
            return Err(proteus_ingest::IngestError::Row {
                path: path.display().to_string(),
                line,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let lon = proteus_ingest::parse_f32(path, line, fields[0])?;
        let lat = proteus_ingest::parse_f32(path, line, fields[1])?;
        let height = proteus_ingest::parse_f32(path, line, fields[2])?;
        insert_point(&mut grid, lon, lat, height);
        Ok(())
    })
    .map_err(|e| ProteusError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(grid)
}

fn insert_point(grid: &mut [f32], mut lon: f32, lat: f32, height: f32) {
    if lon >= 180.0 {
        lon -= 360.0;
    }

    let ilon = lon.round() as i32 + 180;
    let ilat = lat.round() as i32 + 90;

    if !(0..GRID_Y).contains(&ilat) {
        tracing::warn!(lon, lat, ilon, ilat, "failed to insert wave grid point");
        return;
    }

    let ilon = if ilon == GRID_X { 0 } else { ilon };
    grid[LAYOUT.flat_index(ilon, ilat)] = height;
}
