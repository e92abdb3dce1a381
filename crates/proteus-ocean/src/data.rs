use std::path::Path;

use proteus_core::ProteusError;
use proteus_grid::GridLayout;

pub const GRID_X: i32 = 900;
pub const GRID_Y: i32 = 397;

pub const LAYOUT: GridLayout = GridLayout {
    nx: GRID_X,
    ny: GRID_Y,
    offset_x: 450.0,
    offset_y: 196.0,
    scale: 2.5,
};

/// 11 hours, 58 minutes.
pub const PHASE_SECONDS: i64 = 11 * 3600 + 58 * 60;

/// A single ocean grid cell: current (u, v) in m/s, sea surface temperature in C, and
/// salinity. `None` marks a cell with no observation, the direct equivalent of the
/// original grid's `valid` flag.
#[derive(Debug, Clone, Copy)]
pub struct OceanPoint {
    pub current_u: f32,
    pub current_v: f32,
    pub surface_temp: f32,
    pub salinity: f32,
}

pub type Cell = Option<OceanPoint>;

pub fn load_grid(path: &Path, seed: Option<&[Cell]>) -> Result<Vec<Cell>, ProteusError> {
    let mut grid = match seed {
        Some(seed) => seed.to_vec(),
        None => vec![None; LAYOUT.len()],
    };

    proteus_ingest::for_each_row(path, |line, fields| {
        if fields.len() != 6 {
            return Err(proteus_ingest::IngestError::Row {
                path: path.display().to_string(),
                line,
                message: format!("expected 6 fields, found {}", fields.len()),
            });
        }
        let lon = proteus_ingest::parse_f32(path, line, fields[0])?;
        let lat = proteus_ingest::parse_f32(path, line, fields[1])?;
        let temp = proteus_ingest::parse_f32(path, line, fields[2])?;
        let u = proteus_ingest::parse_f32(path, line, fields[3])?;
        let v = proteus_ingest::parse_f32(path, line, fields[4])?;
        let salinity = proteus_ingest::parse_f32(path, line, fields[5])?;
        insert_point(&mut grid, lon, lat, u, v, temp, salinity);
        Ok(())
    })
    .map_err(|e| ProteusError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(grid)
}

fn insert_point(grid: &mut [Cell], mut lon: f32, lat: f32, u: f32, v: f32, temp: f32, salinity: f32) {
    if lon >= 180.0 {
        lon -= 360.0;
    }

    let ilon = (lon * 2.5).round() as i32 + 450;
    let ilat = (lat * 2.5).round() as i32 + 196;

    if !(0..GRID_Y).contains(&ilat) {
        tracing::warn!(lon, lat, ilon, ilat, "failed to insert ocean grid point");
        return;
    }

    let ilon = if ilon == GRID_X { 0 } else { ilon };
    grid[LAYOUT.flat_index(ilon, ilat)] = Some(OceanPoint {
        current_u: u,
        current_v: v,
        surface_temp: temp,
        salinity,
    });
}
