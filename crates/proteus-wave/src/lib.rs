//! Significant wave height grid with a two-snapshot forecast blend.

mod data;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use proteus_core::ProteusError;
use proteus_grid::{CancelToken, Snapshots};
use proteus_math::GeoPos;
use tokio::sync::RwLock;

use data::{is_valid, load_grid, LAYOUT, PHASE_SECONDS};

const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Wave height at a point, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveData {
    pub wave_height: f64,
}

struct Paths {
    f1: PathBuf,
    f2: PathBuf,
}

/// Wave grid context: owns the G0/G1 snapshot pair behind a reader-writer lock (reads
/// -- `get` -- vastly outnumber the twice-daily refresh writes) and a background task
/// that refreshes it on the 18:00Z/06:00Z synoptic schedule.
pub struct WaveGrid {
    snapshots: Arc<RwLock<Snapshots<Vec<f32>>>>,
    cancel: CancelToken,
    refresh: Option<tokio::task::JoinHandle<()>>,
}

impl WaveGrid {
    /// Loads the initial grid pair from `f1`/`f2` and starts the background refresh
    /// task. If the current UTC hour is within one hour of either synoptic boundary,
    /// both snapshots start out identical (the "f2" forecast would be stale relative to
    /// "f1" at that point, so there's nothing meaningful to blend yet).
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

        tracing::info!(seconds_from_now = (phase_time - now).num_seconds(), "wave grid phase time set");

        let snapshots = Arc::new(RwLock::new(Snapshots::new(g0, g1, phase_time)));
        let cancel = CancelToken::new();

        let refresh = {
            let snapshots = snapshots.clone();
            let cancel = cancel.clone();
            let paths = Paths { f1, f2 };
            tokio::spawn(async move { refresh_loop(snapshots, paths, cancel).await })
        };

        Ok(WaveGrid {
            snapshots,
            cancel,
            refresh: Some(refresh),
        })
    }

    /// Returns the interpolated wave height at `pos`, or `None` if no valid data covers
    /// that cell in either forecast snapshot.
    pub async fn get(&self, pos: &GeoPos) -> Option<WaveData> {
        let loc = LAYOUT.locate(pos)?;
        let corners = LAYOUT.corners(&loc);
        let snapshots = self.snapshots.read().await;

        let at = |grid: &[f32], idx: (i32, i32)| grid[LAYOUT.flat_index(idx.0, idx.1)];

        let blend = |grid: &[f32]| -> Option<f64> {
            let values = [
                at(grid, corners.a) as f64,
                at(grid, corners.b) as f64,
                at(grid, corners.c) as f64,
                at(grid, corners.d) as f64,
            ];
            let valid = [
                is_valid(at(grid, corners.a)),
                is_valid(at(grid, corners.b)),
                is_valid(at(grid, corners.c)),
                is_valid(at(grid, corners.d)),
            ];
            let mask = proteus_grid::ValidityMask::from_corners(valid);
            let corners = proteus_grid::average_substitute(values, mask)?;
            Some(proteus_grid::bilinear(corners, loc.x_frac, loc.y_frac))
        };

        let height0 = blend(&snapshots.g0)?;
        let height1 = blend(&snapshots.g1)?;

        let t_frac = proteus_grid::phase_fraction(Utc::now(), snapshots.phase_time, PHASE_SECONDS);
        Some(WaveData {
            wave_height: proteus_grid::temporal_blend(height0, height1, t_frac),
        })
    }
}

impl Drop for WaveGrid {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.refresh.take() {
            handle.abort();
        }
    }
}

async fn refresh_loop(snapshots: Arc<RwLock<Snapshots<Vec<f32>>>>, paths: Paths, cancel: CancelToken) {
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
                tracing::error!(error = %e, "failed to refresh wave grid");
            }
            pending = false;
        }
    }
}

async fn refresh_once(
    snapshots: &Arc<RwLock<Snapshots<Vec<f32>>>>,
    path: &PathBuf,
) -> Result<(), ProteusError> {
    let seed = { snapshots.read().await.g1.clone() };
    let new_g1 = load_grid(path, Some(&seed))?;

    let phase_time: DateTime<Utc> = Utc::now() + chrono::Duration::seconds(PHASE_SECONDS);
    let mut snapshots = snapshots.write().await;
    snapshots.rotate(new_g1, phase_time);
    tracing::info!(path = %path.display(), "updated wave grids");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_grid(height: f32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-60,40,{height}").unwrap();
        writeln!(file, "-59,40,{height}").unwrap();
        writeln!(file, "-60,41,{height}").unwrap();
        writeln!(file, "-59,41,{height}").unwrap();
        file
    }

    #[tokio::test]
    async fn interpolates_constant_height() {
        let f1 = write_grid(2.5);
        let f2 = write_grid(2.5);
        let grid = WaveGrid::init(f1.path().to_path_buf(), f2.path().to_path_buf())
            .await
            .unwrap();

        let wd = grid.get(&GeoPos::new(40.5, -59.5)).await.unwrap();
        assert!((wd.wave_height - 2.5).abs() < 1e-6);
    }

    #[tokio::test]
    async fn out_of_range_latitude_returns_none() {
        let f1 = write_grid(2.5);
        let f2 = write_grid(2.5);
        let grid = WaveGrid::init(f1.path().to_path_buf(), f2.path().to_path_buf())
            .await
            .unwrap();

        assert!(grid.get(&GeoPos::new(90.0, 0.0)).await.is_none());
    }
}
