use std::path::Path;

use proteus_core::ProteusError;

pub const COND_RAIN: u8 = 0x01;
pub const COND_SNOW: u8 = 0x02;
pub const COND_ICEP: u8 = 0x04;
pub const COND_FRZR: u8 = 0x08;

/// 2 hours, 58 minutes.
pub const PHASE_SECONDS: i64 = 2 * 3600 + 58 * 60;

/// Source data grid resolution. Each variant carries the layout the original
/// library keyed by an integer source-data-grid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    P1_00,
    P0_50,
    P0_25,
}

#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    pub grid_x: i32,
    pub grid_y: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub scale: f64,
}

impl Resolution {
    pub fn config(self) -> GridConfig {
        match self {
            Resolution::P1_00 => GridConfig {
                grid_x: 360,
                grid_y: 181,
                offset_x: 180,
                offset_y: 90,
                scale: 1.0,
            },
            Resolution::P0_50 => GridConfig {
                grid_x: 720,
                grid_y: 361,
                offset_x: 360,
                offset_y: 180,
                scale: 2.0,
            },
            Resolution::P0_25 => GridConfig {
                grid_x: 1440,
                grid_y: 721,
                offset_x: 720,
                offset_y: 360,
                scale: 4.0,
            },
        }
    }
}

/// A single weather grid cell. Fields are in their raw source units; unit
/// conversion (K to C, Pa to hPa, etc.) happens at query time in `get`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WxGridPoint {
    pub wind_u: f32,
    pub wind_v: f32,
    pub wind_gust: f32,

    pub temp: f32,
    pub dewpoint: f32,
    pub pressure: f32,
    pub cloud: f32,
    pub visibility: f32,
    pub prate: f32,

    pub cond: u8,
}

fn xy_index(config: &GridConfig, x: i32, y: i32) -> usize {
    (y * config.grid_x + x) as usize
}

fn index_for_insert(config: &GridConfig, lon: f32, lat: f32) -> Option<usize> {
    let mut ilon = (lon as f64 * config.scale).round() as i32 + config.offset_x;
    let ilat = (lat as f64 * config.scale).round() as i32 + config.offset_y;

    if ilon == config.grid_x {
        ilon = 0;
    }

    if !(0..config.grid_x).contains(&ilon) || !(0..config.grid_y).contains(&ilat) {
        return None;
    }

    Some(xy_index(config, ilon, ilat))
}

fn load_float_field(
    dir: &Path,
    file: &str,
    config: &GridConfig,
    grid: &mut [WxGridPoint],
    set: impl Fn(&mut WxGridPoint, f32),
) -> Result<(), ProteusError> {
    let path = dir.join(file);
    proteus_ingest::for_each_row(&path, |line, fields| {
        if fields.len() != 3 {
            return Err(proteus_ingest::IngestError::Row {
                path: path.display().to_string(),
                line,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let lon = proteus_ingest::parse_f32(&path, line, fields[0])?;
        let lat = proteus_ingest::parse_f32(&path, line, fields[1])?;
        let v = proteus_ingest::parse_f32(&path, line, fields[2])?;
        if let Some(idx) = index_for_insert(config, lon, lat) {
            set(&mut grid[idx], v);
        } else {
            tracing::warn!(lon, lat, file, "failed to insert weather grid point");
        }
        Ok(())
    })
    .map_err(|e| ProteusError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn load_cond_field(
    dir: &Path,
    file: &str,
    bit: u8,
    config: &GridConfig,
    grid: &mut [WxGridPoint],
) -> Result<(), ProteusError> {
    let path = dir.join(file);
    proteus_ingest::for_each_row(&path, |line, fields| {
        if fields.len() != 3 {
            return Err(proteus_ingest::IngestError::Row {
                path: path.display().to_string(),
                line,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let lon = proteus_ingest::parse_f32(&path, line, fields[0])?;
        let lat = proteus_ingest::parse_f32(&path, line, fields[1])?;
        let n = proteus_ingest::parse_i32(&path, line, fields[2])?;
        if n == 1 {
            if let Some(idx) = index_for_insert(config, lon, lat) {
                grid[idx].cond |= bit;
            } else {
                tracing::warn!(lon, lat, file, "failed to insert weather grid point");
            }
        }
        Ok(())
    })
    .map_err(|e| ProteusError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Loads a full weather grid from the thirteen per-field CSV files in `dir`.
///
/// `seed` carries forward the previous G1 grid when refreshing live data, so
/// that any field missing from the new source still reads a sane prior value
/// instead of zero. On first load there is no seed and the grid starts zeroed.
pub fn load_grid(
    dir: &Path,
    config: GridConfig,
    seed: Option<&[WxGridPoint]>,
) -> Result<Vec<WxGridPoint>, ProteusError> {
    let len = (config.grid_x * config.grid_y) as usize;
    let mut grid = match seed {
        Some(seed) => seed.to_vec(),
        None => vec![WxGridPoint::default(); len],
    };

    load_float_field(dir, "ugrd.csv", &config, &mut grid, |p, v| p.wind_u = v)?;
    load_float_field(dir, "vgrd.csv", &config, &mut grid, |p, v| p.wind_v = v)?;
    load_float_field(dir, "gust.csv", &config, &mut grid, |p, v| p.wind_gust = v)?;
    load_float_field(dir, "tmp.csv", &config, &mut grid, |p, v| p.temp = v)?;
    load_float_field(dir, "dpt.csv", &config, &mut grid, |p, v| p.dewpoint = v)?;
    load_float_field(dir, "pres.csv", &config, &mut grid, |p, v| p.pressure = v)?;
    load_float_field(dir, "cld.csv", &config, &mut grid, |p, v| p.cloud = v)?;
    load_float_field(dir, "vis.csv", &config, &mut grid, |p, v| p.visibility = v)?;
    load_float_field(dir, "prate.csv", &config, &mut grid, |p, v| p.prate = v)?;

    load_cond_field(dir, "rain.csv", COND_RAIN, &config, &mut grid)?;
    load_cond_field(dir, "snow.csv", COND_SNOW, &config, &mut grid)?;
    load_cond_field(dir, "icep.csv", COND_ICEP, &config, &mut grid)?;
    load_cond_field(dir, "frzr.csv", COND_FRZR, &config, &mut grid)?;

    Ok(grid)
}

/// The four corner grid indices used to sample a query position, already
/// adjusted for the east-seam wrap and the latitude-offset row collapse.
pub struct Corners {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

pub struct Location {
    pub x_frac: f64,
    pub y_frac: f64,
}

/// Locates the grid cell containing `pos` and resolves its four corner
/// indices, applying the same two boundary special cases as the original:
/// wrapping the east seam back to column 0, and collapsing the C/D corners
/// onto A/B for the row sitting exactly on the configured latitude offset.
pub fn locate(config: &GridConfig, lon: f64, lat: f64) -> (Corners, Location) {
    let mut ilon = (lon * config.scale).floor() as i32 + config.offset_x;
    let ilat = (lat * config.scale).floor() as i32 + config.offset_y;

    if ilon == config.grid_x {
        ilon = 0;
    }

    let east_col = if ilon == config.grid_x - 1 { 0 } else { ilon + 1 };

    let a = xy_index(config, ilon, ilat);
    let b = xy_index(config, east_col, ilat);
    let mut c = xy_index(config, ilon, ilat + 1);
    let mut d = xy_index(config, east_col, ilat + 1);

    if ilat == config.offset_y {
        c = a;
        d = b;
    }

    let x_frac = if ilon == 0 && lon == 180.0 {
        0.0
    } else {
        (lon * config.scale) - (ilon - config.offset_x) as f64
    };
    let y_frac = (lat * config.scale) - (ilat - config.offset_y) as f64;

    (Corners { a, b, c, d }, Location { x_frac, y_frac })
}
