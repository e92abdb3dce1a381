//! Magnetic declination lookups over a yearly grid time series.

use std::path::Path;

use proteus_core::ProteusError;
use proteus_grid::GridLayout;
use proteus_math::GeoPos;

const GRID_X: i32 = 360;
const GRID_Y: i32 = 181;

const DATA_YEAR_START: i32 = 2020;
const DATA_YEARS: usize = 6;
const DATA_SEC_AT_START: i64 = 1_577_836_800; // 2020-01-01T00:00:00Z
const DATA_SEC_IN_YEAR: f64 = 31_557_600.0;

const LAYOUT: GridLayout = GridLayout {
    nx: GRID_X,
    ny: GRID_Y,
    offset_x: 180.0,
    offset_y: 90.0,
    scale: 1.0,
};

/// Per-cell declination, one value per year in `[DATA_YEAR_START, DATA_YEAR_START + DATA_YEARS)`.
#[derive(Debug, Clone, Copy)]
struct MagGridPoint {
    dec: [f32; DATA_YEARS],
}

impl Default for MagGridPoint {
    fn default() -> Self {
        MagGridPoint {
            dec: [0.0; DATA_YEARS],
        }
    }
}

/// Magnetic declination grid, built once at startup from a CSV data file and queried
/// thereafter; there is no background refresh for this subsystem (the original library
/// has none either -- the declination model changes slowly enough that a per-process
/// epoch is sufficient).
pub struct CompassGrid {
    points: Vec<MagGridPoint>,
}

impl CompassGrid {
    /// Loads the declination grid from `path`, a CSV file of `lat,lon,year,decl_deg`
    /// rows (see `proteus-ingest` for the row-splitting mechanics).
    pub fn init(path: &Path) -> Result<Self, ProteusError> {
        let mut points = vec![MagGridPoint::default(); LAYOUT.len()];

        proteus_ingest::for_each_row(path, |line, fields| {
            if fields.len() != 4 {
                return Err(proteus_ingest::IngestError::Row {
                    path: path.display().to_string(),
                    line,
                    message: format!("expected 4 fields, found {}", fields.len()),
                });
            }
            let lat = proteus_ingest::parse_f32(path, line, fields[0])?;
            let lon = proteus_ingest::parse_f32(path, line, fields[1])?;
            let year = proteus_ingest::parse_i32(path, line, fields[2])?;
            let dec = proteus_ingest::parse_f32(path, line, fields[3])?;
            insert_point(&mut points, lon, lat, year, dec);
            Ok(())
        })
        .map_err(|e| ProteusError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), "initialized magnetic declination grid");
        Ok(CompassGrid { points })
    }

    /// Returns the magnetic declination in degrees (positive east) at `pos` and time
    /// `t`, or `0.0` when `pos` falls in the unmapped polar cap row. Declination outside
    /// the covered year range is clamped to the nearest covered year rather than
    /// extrapolated further.
    pub fn magdec(&self, pos: &GeoPos, t: chrono::DateTime<chrono::Utc>) -> f64 {
        let Some(loc) = LAYOUT.locate(pos) else {
            return 0.0;
        };
        let corners = LAYOUT.corners(&loc);

        let (t0, t1, t_frac) = year_fractions(t);

        let at = |idx: (i32, i32), year: usize| -> f64 {
            self.points[LAYOUT.flat_index(idx.0, idx.1)].dec[year] as f64
        };

        let blend_year = |year: usize| -> f64 {
            let lower = at(corners.a, year) * (1.0 - loc.x_frac) + at(corners.b, year) * loc.x_frac;
            let upper = at(corners.c, year) * (1.0 - loc.x_frac) + at(corners.d, year) * loc.x_frac;
            lower * (1.0 - loc.y_frac) + upper * loc.y_frac
        };

        let dec0 = blend_year(t0);
        let dec1 = blend_year(t1);
        let mut dec = dec0 * (1.0 - t_frac) + dec1 * t_frac;

        while dec <= -180.0 {
            dec += 360.0;
        }
        while dec > 180.0 {
            dec -= 360.0;
        }
        dec
    }

    /// The signed shortest-path difference `b - a` in degrees, normalized to `(-180, 180]`.
    pub fn diff(a: f64, b: f64) -> f64 {
        let mut c = b - a;
        if c < 0.0 {
            c += 360.0;
        }
        if c > 180.0 {
            c - 360.0
        } else {
            c
        }
    }
}

fn year_fractions(t: chrono::DateTime<chrono::Utc>) -> (usize, usize, f64) {
    let y = (t.timestamp() - DATA_SEC_AT_START) as f64 / DATA_SEC_IN_YEAR;

    if y <= 0.0 {
        (0, 0, 0.0)
    } else if y >= (DATA_YEARS - 1) as f64 {
        (DATA_YEARS - 1, DATA_YEARS - 1, 0.0)
    } else {
        let t0 = y.floor() as usize;
        (t0, t0 + 1, y - y.floor())
    }
}

fn insert_point(points: &mut [MagGridPoint], mut lon: f32, lat: f32, year: i32, dec: f32) {
    let year_idx = year - DATA_YEAR_START;
    if year_idx < 0 || year_idx as usize >= DATA_YEARS {
        return;
    }

    if lon >= 180.0 {
        lon -= 360.0;
    }

    let ilon = lon.round() as i32 + 180;
    let ilat = lat.round() as i32 + 90;

    if !(0..GRID_Y).contains(&ilat) {
        tracing::warn!(lon, lat, ilon, ilat, "failed to insert mag grid point");
        return;
    }

    let ilon = if ilon == GRID_X { 0 } else { ilon };
    let idx = LAYOUT.flat_index(ilon, ilat);
    points[idx].dec[year_idx as usize] = dec;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn write_fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for year in 2020..2026 {
            writeln!(file, "40,-60,{year},-14.0").unwrap();
            writeln!(file, "41,-60,{year},-14.2").unwrap();
            writeln!(file, "40,-59,{year},-13.8").unwrap();
            writeln!(file, "41,-59,{year},-14.0").unwrap();
        }
        file
    }

    #[test]
    fn interpolates_within_loaded_cell() {
        let file = write_fixture();
        let grid = CompassGrid::init(file.path()).unwrap();
        let t = chrono::Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap();
        let dec = grid.magdec(&GeoPos::new(40.5, -59.5), t);
        assert!(dec < -13.0 && dec > -14.5);
    }

    #[test]
    fn polar_cap_returns_zero() {
        let file = write_fixture();
        let grid = CompassGrid::init(file.path()).unwrap();
        let t = chrono::Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(grid.magdec(&GeoPos::new(90.0, 0.0), t), 0.0);
    }

    #[test]
    fn diff_wraps_shortest_path() {
        assert!((CompassGrid::diff(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((CompassGrid::diff(10.0, 350.0) + 20.0).abs() < 1e-9);
    }
}
