//! Weather grid (wind, temperature, pressure, precipitation) with a two-snapshot
//! forecast blend, at one of three source data resolutions.

mod data;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use proteus_core::ProteusError;
use proteus_grid::{bilinear, phase_fraction, temporal_blend, CancelToken, Snapshots};
use proteus_math::{angle_from_components, GeoPos, GeoVec};
use tokio::sync::Mutex;

use data::{load_grid, locate, GridConfig, WxGridPoint, PHASE_SECONDS};

pub use data::{Resolution, COND_FRZR, COND_ICEP, COND_RAIN, COND_SNOW};

const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Weather conditions at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    /// Wind vector; angle indicates the direction the wind is blowing FROM.
    pub wind: GeoVec,
    pub wind_gust: f64,
    pub temp: f64,
    pub dewpoint: f64,
    pub pressure: f64,
    pub cloud: f64,
    pub visibility: f64,
    pub prate: f64,
    pub cond: u8,
}

struct Paths {
    f1: PathBuf,
    f2: PathBuf,
}

pub struct WeatherGrid {
    config: GridConfig,
    snapshots: Arc<Mutex<Snapshots<Vec<WxGridPoint>>>>,
    cancel: CancelToken,
    refresh: Option<tokio::task::JoinHandle<()>>,
}

impl WeatherGrid {
    pub async fn init(
        resolution: Resolution,
        f1: PathBuf,
        f2: PathBuf,
    ) -> Result<Self, ProteusError> {
        let config = resolution.config();

        let now = Utc::now();
        let hour = now.hour() as i64;
        let minute = now.minute() as i64;

        let (g0, g1, phase_time) = if ((hour + 2) % 6) < 3 {
            // The "f2" data would be older than "f1" here, so init both grids to the
            // same data for now; the actual phase time doesn't matter in that case.
            let g = load_grid(&f1, config, None)?;
            (g.clone(), g, now)
        } else {
            let g0 = load_grid(&f1, config, None)?;
            let g1 = load_grid(&f2, config, None)?;

            // Next phase time at {0115Z, 0715Z, 1315Z, 1915Z} + PHASE_SECONDS.
            let hm3 = (hour - 1) % 3;
            let phase_time = now
                - chrono::Duration::seconds(3600 * hm3)
                - chrono::Duration::minutes(minute)
                + chrono::Duration::minutes(15)
                + chrono::Duration::seconds(PHASE_SECONDS);
            (g0, g1, phase_time)
        };

        tracing::info!(
            seconds_from_now = (phase_time - now).num_seconds(),
            "weather grid phase time set"
        );

        let snapshots = Arc::new(Mutex::new(Snapshots::new(g0, g1, phase_time)));
        let cancel = CancelToken::new();

        let refresh = {
            let snapshots = snapshots.clone();
            let cancel = cancel.clone();
            let paths = Paths { f1, f2 };
            tokio::spawn(async move { refresh_loop(snapshots, paths, config, cancel).await })
        };

        Ok(WeatherGrid {
            config,
            snapshots,
            cancel,
            refresh: Some(refresh),
        })
    }

    /// Queries weather at `pos`. Passing `wind_only` skips every field but the wind
    /// vector and gust speed, avoiding the extra interpolation work when a caller
    /// only needs wind.
    pub async fn get(&self, pos: &GeoPos, wind_only: bool) -> Weather {
        let (corners, loc) = locate(&self.config, pos.lon, pos.lat);
        let snapshots = self.snapshots.lock().await;

        let g0 = &snapshots.g0;
        let g1 = &snapshots.g1;

        let field0 = |pick: fn(&WxGridPoint) -> f32| {
            bilinear(
                [
                    pick(&g0[corners.a]) as f64,
                    pick(&g0[corners.b]) as f64,
                    pick(&g0[corners.c]) as f64,
                    pick(&g0[corners.d]) as f64,
                ],
                loc.x_frac,
                loc.y_frac,
            )
        };
        let field1 = |pick: fn(&WxGridPoint) -> f32| {
            bilinear(
                [
                    pick(&g1[corners.a]) as f64,
                    pick(&g1[corners.b]) as f64,
                    pick(&g1[corners.c]) as f64,
                    pick(&g1[corners.d]) as f64,
                ],
                loc.x_frac,
                loc.y_frac,
            )
        };

        let t_frac = phase_fraction(Utc::now(), snapshots.phase_time, PHASE_SECONDS);

        let wind_u0 = field0(|p| p.wind_u);
        let wind_v0 = field0(|p| p.wind_v);
        let wind_u1 = field1(|p| p.wind_u);
        let wind_v1 = field1(|p| p.wind_v);

        // Source wind components indicate the direction air is blowing TOWARD;
        // the public wind vector reports the direction it's blowing FROM.
        let wind_u = -temporal_blend(wind_u0, wind_u1, t_frac);
        let wind_v = -temporal_blend(wind_v0, wind_v1, t_frac);

        let wind_angle = angle_from_components(wind_u, wind_v);
        let wind_mag = (wind_u * wind_u + wind_v * wind_v).sqrt();

        let gust0 = field0(|p| p.wind_gust);
        let gust1 = field1(|p| p.wind_gust);
        let mut wind_gust = temporal_blend(gust0, gust1, t_frac);
        if wind_gust < wind_mag {
            wind_gust = wind_mag;
        }

        if wind_only {
            return Weather {
                wind: GeoVec::new(wind_angle, wind_mag),
                wind_gust,
                temp: 0.0,
                dewpoint: 0.0,
                pressure: 0.0,
                cloud: 0.0,
                visibility: 0.0,
                prate: 0.0,
                cond: 0,
            };
        }

        let temp = temporal_blend(field0(|p| p.temp), field1(|p| p.temp), t_frac) - 273.15;
        let dewpoint =
            temporal_blend(field0(|p| p.dewpoint), field1(|p| p.dewpoint), t_frac) - 273.15;
        let pressure =
            temporal_blend(field0(|p| p.pressure), field1(|p| p.pressure), t_frac) / 100.0;
        let cloud = temporal_blend(field0(|p| p.cloud), field1(|p| p.cloud), t_frac);
        let visibility =
            temporal_blend(field0(|p| p.visibility), field1(|p| p.visibility), t_frac);
        let prate = temporal_blend(field0(|p| p.prate), field1(|p| p.prate), t_frac) * 3600.0;

        // Precipitation condition is picked from the nearest corner and nearest
        // snapshot rather than interpolated -- it's a bitmask, not a scalar.
        let cond_corner = if loc.x_frac < 0.5 && loc.y_frac < 0.5 {
            corners.a
        } else if loc.x_frac > 0.5 && loc.y_frac < 0.5 {
            corners.b
        } else if loc.x_frac < 0.5 && loc.y_frac > 0.5 {
            corners.c
        } else {
            corners.d
        };
        let cond = if t_frac < 0.5 {
            g0[cond_corner].cond
        } else {
            g1[cond_corner].cond
        };

        Weather {
            wind: GeoVec::new(wind_angle, wind_mag),
            wind_gust,
            temp,
            dewpoint,
            pressure,
            cloud,
            visibility,
            prate,
            cond,
        }
    }
}

impl Drop for WeatherGrid {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.refresh.take() {
            handle.abort();
        }
    }
}

async fn refresh_loop(
    snapshots: Arc<Mutex<Snapshots<Vec<WxGridPoint>>>>,
    paths: Paths,
    config: GridConfig,
    cancel: CancelToken,
) {
    let mut pending = false;

    loop {
        if cancel.wait_or_cancelled(POLL_INTERVAL).await {
            return;
        }

        let now = Utc::now();
        let hour = now.hour();
        let minute = now.minute();

        // Attempt an update once every three hours (01Z, 04Z, ..., 22Z), 15 minutes past.
        if hour % 3 == 1 && minute < 15 {
            pending = true;
        } else if minute >= 15 && pending {
            let path = if hour % 6 == 4 { &paths.f1 } else { &paths.f2 };
            if let Err(e) = refresh_once(&snapshots, path, config).await {
                tracing::error!(error = %e, "failed to refresh weather grid");
            }
            pending = false;
        }
    }
}

async fn refresh_once(
    snapshots: &Arc<Mutex<Snapshots<Vec<WxGridPoint>>>>,
    path: &PathBuf,
    config: GridConfig,
) -> Result<(), ProteusError> {
    let seed = { snapshots.lock().await.g1.clone() };
    let new_g1 = load_grid(path, config, Some(&seed))?;

    let phase_time: DateTime<Utc> = Utc::now() + chrono::Duration::seconds(PHASE_SECONDS);
    let mut snapshots = snapshots.lock().await;
    snapshots.rotate(new_g1, phase_time);
    tracing::info!(path = %path.display(), "updated weather grids");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write_field(dir: &std::path::Path, file: &str, rows: &[(f32, f32, f32)]) {
        let mut f = std::fs::File::create(dir.join(file)).unwrap();
        for (lon, lat, v) in rows {
            writeln!(f, "{lon},{lat},{v}").unwrap();
        }
    }

    fn write_all_fields(dir: &std::path::Path, pos: (f32, f32)) {
        let (lon, lat) = pos;
        write_field(dir, "ugrd.csv", &[(lon, lat, 5.0)]);
        write_field(dir, "vgrd.csv", &[(lon, lat, 0.0)]);
        write_field(dir, "gust.csv", &[(lon, lat, 1.0)]);
        write_field(dir, "tmp.csv", &[(lon, lat, 288.15)]);
        write_field(dir, "dpt.csv", &[(lon, lat, 280.0)]);
        write_field(dir, "pres.csv", &[(lon, lat, 101325.0)]);
        write_field(dir, "cld.csv", &[(lon, lat, 50.0)]);
        write_field(dir, "vis.csv", &[(lon, lat, 10000.0)]);
        write_field(dir, "prate.csv", &[(lon, lat, 0.0)]);
        write_int_field(dir, "rain.csv", &[(lon, lat, 0)]);
        write_int_field(dir, "snow.csv", &[(lon, lat, 0)]);
        write_int_field(dir, "icep.csv", &[(lon, lat, 0)]);
        write_int_field(dir, "frzr.csv", &[(lon, lat, 0)]);
    }

    fn write_int_field(dir: &std::path::Path, file: &str, rows: &[(f32, f32, i32)]) {
        let mut f = std::fs::File::create(dir.join(file)).unwrap();
        for (lon, lat, v) in rows {
            writeln!(f, "{lon},{lat},{v}").unwrap();
        }
    }

    #[tokio::test]
    async fn wind_direction_is_reported_as_coming_from() {
        let dir = write_dir();
        // Cover the whole 1.00 degree grid cell containing (40.2, -60.2).
        for (lon, lat) in [(-60.0, 40.0), (-59.0, 40.0), (-60.0, 41.0), (-59.0, 41.0)] {
            write_all_fields(dir.path(), (lon, lat));
        }
        let grid = WeatherGrid::init(
            Resolution::P1_00,
            dir.path().to_path_buf(),
            dir.path().to_path_buf(),
        )
        .await
        .unwrap();

        let wx = grid.get(&GeoPos::new(40.2, -59.8), false).await;
        // Source wind is pure-eastward (u=5, v=0): blowing FROM the west, i.e. 270 degrees.
        assert!((wx.wind.angle - 270.0).abs() < 1e-6);
        assert!((wx.wind.mag - 5.0).abs() < 1e-6);
        assert!((wx.temp - 15.0).abs() < 0.01);
        assert!((wx.pressure - 1013.25).abs() < 0.01);
    }

    #[tokio::test]
    async fn gust_is_never_below_wind_magnitude() {
        let dir = write_dir();
        for (lon, lat) in [(-60.0, 40.0), (-59.0, 40.0), (-60.0, 41.0), (-59.0, 41.0)] {
            write_field(dir.path(), "ugrd.csv", &[(lon, lat, 20.0)]);
            write_field(dir.path(), "vgrd.csv", &[(lon, lat, 0.0)]);
            write_field(dir.path(), "gust.csv", &[(lon, lat, 1.0)]);
            write_field(dir.path(), "tmp.csv", &[(lon, lat, 288.15)]);
            write_field(dir.path(), "dpt.csv", &[(lon, lat, 280.0)]);
            write_field(dir.path(), "pres.csv", &[(lon, lat, 101325.0)]);
            write_field(dir.path(), "cld.csv", &[(lon, lat, 0.0)]);
            write_field(dir.path(), "vis.csv", &[(lon, lat, 10000.0)]);
            write_field(dir.path(), "prate.csv", &[(lon, lat, 0.0)]);
            write_int_field(dir.path(), "rain.csv", &[(lon, lat, 0)]);
            write_int_field(dir.path(), "snow.csv", &[(lon, lat, 0)]);
            write_int_field(dir.path(), "icep.csv", &[(lon, lat, 0)]);
            write_int_field(dir.path(), "frzr.csv", &[(lon, lat, 0)]);
        }

        let grid = WeatherGrid::init(
            Resolution::P1_00,
            dir.path().to_path_buf(),
            dir.path().to_path_buf(),
        )
        .await
        .unwrap();

        let wx = grid.get(&GeoPos::new(40.2, -59.8), true).await;
        assert!((wx.wind_gust - wx.wind.mag).abs() < 1e-6);
    }
}
