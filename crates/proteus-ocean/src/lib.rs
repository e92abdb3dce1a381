//! Ocean surface current/temperature/salinity grid with a two-snapshot forecast blend.

mod data;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use proteus_core::ProteusError;
use proteus_grid::{CancelToken, Snapshots};
use proteus_math::{angle_from_components, GeoPos, GeoVec};
use tokio::sync::Mutex;

use data::{load_grid, Cell, OceanPoint, LAYOUT, PHASE_SECONDS};

const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Ocean surface conditions at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OceanData {
    pub current: GeoVec,
    pub surface_temp: f64,
    pub salinity: f64,
    pub ice: f64,
}

struct Paths {
    f1: PathBuf,
    f2: PathBuf,
}

/// Ocean grid context. Uses a plain mutex rather than a reader-writer lock, matching the
/// original `Ocean` module -- unlike wave height, ocean queries also do nontrivial
/// per-query math (ice estimation), so the original author evidently didn't consider the
/// read path hot enough to warrant a dedicated read lock.
pub struct OceanGrid {
    snapshots: Arc<Mutex<Snapshots<Vec<Cell>>>>,
    cancel: CancelToken,
    refresh: Option<tokio::task::JoinHandle<()>>,
}

impl OceanGrid {
    pub async fn init(f1: PathBuf, f2: PathBuf) -> Result<Self, ProteusError> {
        let now = Utc::now();
        let hour = now.hour();
        let minute = now.minute();

        let (g0, g1, phase_time) = if !(6..17).contains(&hour) {
            let g = load_grid(&f1, None)?;
            (g.clone(), g, now)
        } else {
            let g0 = load_grid(&f1, None)?;
            let g1 = load_grid(&f2, None)?;
            let phase_time = now - chrono::Duration::hours(hour as i64)
                - chrono::Duration::minutes(minute as i64)
                + chrono::Duration::hours(6)
                + chrono::Duration::seconds(PHASE_SECONDS);
            (g0, g1, phase_time)
        };

        tracing::info!(seconds_from_now = (phase_time - now).num_seconds(), "ocean grid phase time set");

        let snapshots = Arc::new(Mutex::new(Snapshots::new(g0, g1, phase_time)));
        let cancel = CancelToken::new();

        let refresh = {
            let snapshots = snapshots.clone();
            let cancel = cancel.clone();
            let paths = Paths { f1, f2 };
            tokio::spawn(async move { refresh_loop(snapshots, paths, cancel).await })
        };

        Ok(OceanGrid {
            snapshots,
            cancel,
            refresh: Some(refresh),
        })
    }

    pub async fn get(&self, pos: &GeoPos) -> Option<OceanData> {
        let loc = LAYOUT.locate(pos)?;
        let corners = LAYOUT.corners(&loc);
        let snapshots = self.snapshots.lock().await;

        let blend = |grid: &[Cell]| -> Option<(f64, f64, f64, f64)> {
            let cells = [
                grid[LAYOUT.flat_index(corners.a.0, corners.a.1)],
                grid[LAYOUT.flat_index(corners.b.0, corners.b.1)],
                grid[LAYOUT.flat_index(corners.c.0, corners.c.1)],
                grid[LAYOUT.flat_index(corners.d.0, corners.d.1)],
            ];
            let valid = [
                cells[0].is_some(),
                cells[1].is_some(),
                cells[2].is_some(),
                cells[3].is_some(),
            ];
            let mask = proteus_grid::ValidityMask::from_corners(valid);

            let field = |idx: usize, pick: fn(&OceanPoint) -> f32| {
                cells[idx].map(|c| pick(&c) as f64).unwrap_or(0.0)
            };

            let u = proteus_grid::average_substitute(
                [
                    field(0, |p| p.current_u),
                    field(1, |p| p.current_u),
                    field(2, |p| p.current_u),
                    field(3, |p| p.current_u),
                ],
                mask,
            )?;
            let v = proteus_grid::average_substitute(
                [
                    field(0, |p| p.current_v),
                    field(1, |p| p.current_v),
                    field(2, |p| p.current_v),
                    field(3, |p| p.current_v),
                ],
                mask,
            )?;
            let t = proteus_grid::average_substitute(
                [
                    field(0, |p| p.surface_temp),
                    field(1, |p| p.surface_temp),
                    field(2, |p| p.surface_temp),
                    field(3, |p| p.surface_temp),
                ],
                mask,
            )?;
            let s = proteus_grid::average_substitute(
                [
                    field(0, |p| p.salinity),
                    field(1, |p| p.salinity),
                    field(2, |p| p.salinity),
                    field(3, |p| p.salinity),
                ],
                mask,
            )?;

            Some((
                proteus_grid::bilinear(u, loc.x_frac, loc.y_frac),
                proteus_grid::bilinear(v, loc.x_frac, loc.y_frac),
                proteus_grid::bilinear(t, loc.x_frac, loc.y_frac),
                proteus_grid::bilinear(s, loc.x_frac, loc.y_frac),
            ))
        };

        let (u0, v0, t0, s0) = blend(&snapshots.g0)?;
        let (u1, v1, t1, s1) = blend(&snapshots.g1)?;

        let t_frac = proteus_grid::phase_fraction(Utc::now(), snapshots.phase_time, PHASE_SECONDS);
        let current_u = proteus_grid::temporal_blend(u0, u1, t_frac);
        let current_v = proteus_grid::temporal_blend(v0, v1, t_frac);
        let surface_temp = proteus_grid::temporal_blend(t0, t1, t_frac);
        let salinity = proteus_grid::temporal_blend(s0, s1, t_frac);

        let angle = angle_from_components(current_u, current_v);
        let mag = (current_u * current_u + current_v * current_v).sqrt();

        let ice = compute_ice(surface_temp, salinity);

        Some(OceanData {
            current: GeoVec::new(angle, mag),
            surface_temp,
            salinity,
            ice,
        })
    }
}

/// Estimates sea ice concentration (percent) from surface temperature and salinity.
/// Above 0C the ocean can never be frozen at Earth-like pressures, so ice is zero by
/// definition; below that the coefficients are an empirical fit, not a physical model.
fn compute_ice(surface_temp: f64, salinity: f64) -> f64 {
    if surface_temp > 0.0 {
        return 0.0;
    }
    let ice = (-7500.0 * surface_temp / salinity) - 300.0;
    ice.clamp(0.0, 100.0)
}

impl Drop for OceanGrid {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.refresh.take() {
            handle.abort();
        }
    }
}

async fn refresh_loop(snapshots: Arc<Mutex<Snapshots<Vec<Cell>>>>, paths: Paths, cancel: CancelToken) {
    let mut pending = false;

    loop {
        if cancel.wait_or_cancelled(POLL_INTERVAL).await {
            return;
        }

        let hour = Utc::now().hour();

        if hour == 17 || hour == 5 {
            pending = true;
        } else if pending && (hour == 18 || hour == 6) {
            let path = if hour == 18 { &paths.f1 } else { &paths.f2 };
            if let Err(e) = refresh_once(&snapshots, path).await {
                tracing::error!(error = %e, "failed to refresh ocean grid");
            }
            pending = false;
        }
    }
}

async fn refresh_once(
    snapshots: &Arc<Mutex<Snapshots<Vec<Cell>>>>,
    path: &PathBuf,
) -> Result<(), ProteusError> {
    let seed = { snapshots.lock().await.g1.clone() };
    let new_g1 = load_grid(path, Some(&seed))?;

    let phase_time: DateTime<Utc> = Utc::now() + chrono::Duration::seconds(PHASE_SECONDS);
    let mut snapshots = snapshots.lock().await;
    snapshots.rotate(new_g1, phase_time);
    tracing::info!(path = %path.display(), "updated ocean grids");
    Ok(())
}
