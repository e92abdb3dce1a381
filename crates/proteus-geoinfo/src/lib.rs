//! Demand-paged land/water tile cache.

mod tile;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use proteus_core::ProteusError;
use proteus_math::GeoPos;

use tile::TileSlot;
pub use tile::{bit_is_water, tile_path, TILE_BYTES};

const GRID_X: i32 = 360;
const GRID_Y: i32 = 181;
const NUM_TILES: usize = (GRID_X * GRID_Y) as usize;

const PRUNER_INTERVAL: Duration = Duration::from_secs(3600);
const PRUNER_EXPIRY: Duration = Duration::from_secs(21600);

fn tile_index(ilat: i32, ilon: i32) -> usize {
    ((ilat + 90) * GRID_X + (ilon + 180)) as usize
}

/// Demand-paged cache of 1x1 degree land/water bitmap tiles, each guarded by its own
/// mutex so concurrent lookups in different tiles never contend, mirroring the
/// per-`SquareDegree` mutex design of the original `GeoInfo` module. A background task
/// periodically frees tiles that have not been queried recently.
pub struct GeoInfoCache {
    slots: Arc<Vec<Mutex<TileSlot>>>,
    data_dir: PathBuf,
    cancel: proteus_grid::CancelToken,
    pruner: Option<tokio::task::JoinHandle<()>>,
}

impl GeoInfoCache {
    /// Creates a cache rooted at `data_dir` and spawns its background pruner task.
    /// Loading is entirely lazy: no tile is read from disk until first queried.
    pub fn init(data_dir: PathBuf) -> Result<Self, ProteusError> {
        let mut slots = Vec::with_capacity(NUM_TILES);
        slots.resize_with(NUM_TILES, || Mutex::new(TileSlot::default()));
        let slots = Arc::new(slots);

        let cancel = proteus_grid::CancelToken::new();

        let pruner = {
            let slots = slots.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { pruner_loop(slots, cancel).await })
        };

        tracing::info!(path = %data_dir.display(), "initialized land/water tile cache");

        Ok(GeoInfoCache {
            slots,
            data_dir,
            cancel,
            pruner: Some(pruner),
        })
    }

    /// Returns `true` if `pos` is over water.
    ///
    /// Tiles south of 79 S with no data file are assumed water (Antarctic interior
    /// tiles are simply absent from the data set); all other missing tiles are also
    /// assumed water, matching `proteus_GeoInfo_isWater`'s ENOENT handling.
    pub fn is_water(&self, pos: &GeoPos) -> bool {
        let ilon = pos.lon.floor() as i32;
        let ilat = pos.lat.floor() as i32;
        let idx = tile_index(ilat, ilon);

        let mut slot = self.slots[idx].lock().expect("tile mutex poisoned");

        if !slot.loaded {
            let path = tile_path(&self.data_dir, ilat, ilon);
            match proteus_ingest::read_gzip_tile(&path) {
                Ok(grid) => {
                    slot.grid = grid;
                    slot.loaded = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "failed to load land/water tile, assuming water");
                    slot.grid = None;
                    slot.loaded = true;
                }
            }
        }

        slot.last_used = Instant::now();

        match &slot.grid {
            None => ilat >= -79,
            Some(grid) => {
                let lon_frac = pos.lon - ilon as f64;
                let lat_frac = pos.lat - ilat as f64;
                bit_is_water(grid, lon_frac, lat_frac)
            }
        }
    }
}

impl Drop for GeoInfoCache {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.pruner.take() {
            handle.abort();
        }
    }
}

async fn pruner_loop(slots: Arc<Vec<Mutex<TileSlot>>>, cancel: proteus_grid::CancelToken) {
    loop {
        if cancel.wait_or_cancelled(PRUNER_INTERVAL).await {
            return;
        }

        let now = Instant::now();
        let mut loaded = 0u32;
        let mut gridded = 0u32;
        let mut retained = 0u32;

        for slot in slots.iter() {
            let mut slot = slot.lock().expect("tile mutex poisoned");
            if !slot.loaded {
                continue;
            }
            loaded += 1;
            if slot.grid.is_some() {
                gridded += 1;
            }
            if now.duration_since(slot.last_used) >= PRUNER_EXPIRY {
                slot.loaded = false;
                slot.grid = None;
            } else {
                retained += 1;
            }
        }

        tracing::debug!(loaded, gridded, retained, "grid pruner done");
    }
}
