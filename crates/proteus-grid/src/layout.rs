use proteus_math::GeoPos;

/// Describes a regular lat/lon grid's dimensions and how lon/lat map to cell indices.
///
/// `scale` cells per degree, `offset_x`/`offset_y` cells added so that the minimum
/// longitude/latitude map to index 0. This generalizes the indexing arithmetic that
/// appears, duplicated, in the wave/ocean/weather/compass grids of the original library
/// (e.g. a 1-degree grid has `scale = 1.0, offset_x = 180.0, offset_y = 90.0`; the
/// quarter-degree weather grid has `scale = 4.0, offset_x = 720.0, offset_y = 360.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub nx: i32,
    pub ny: i32,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

/// A located point within a [`GridLayout`]: the lower-left corner cell index and the
/// fractional offset within that cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub ilon: i32,
    pub ilat: i32,
    pub x_frac: f64,
    pub y_frac: f64,
}

/// The four corners of a cell, ordered A (ilon,ilat), B (ilon+1,ilat), C (ilon,ilat+1),
/// D (ilon+1,ilat+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub a: (i32, i32),
    pub b: (i32, i32),
    pub c: (i32, i32),
    pub d: (i32, i32),
}

impl GridLayout {
    /// Locates `pos` within the grid, applying the east-seam wrap and dateline pinning
    /// that the original grids all perform. Returns `None` if the latitude falls outside
    /// the grid's valid row range (the top row has no row above it to interpolate
    /// against, matching `ilat >= ny - 1` in the C sources).
    pub fn locate(&self, pos: &GeoPos) -> Option<Location> {
        let lon_floor = (pos.lon * self.scale).floor();
        let lat_floor = (pos.lat * self.scale).floor();

        let mut ilon = lon_floor as i32 + self.offset_x as i32;
        let ilat = lat_floor as i32 + self.offset_y as i32;

        if ilat < 0 || ilat >= self.ny - 1 {
            return None;
        }

        let max_lon = -self.offset_x / self.scale + (self.nx as f64) / self.scale;

        if ilon == self.nx {
            ilon = 0;
        }

        let x_frac = if ilon == 0 && pos.lon >= max_lon {
            0.0
        } else {
            pos.lon * self.scale - lon_floor
        };
        let y_frac = pos.lat * self.scale - lat_floor;

        Some(Location {
            ilon,
            ilat,
            x_frac,
            y_frac,
        })
    }

    /// Returns the four corner cell indices for `loc`, wrapping B and D back to column 0
    /// when the cell sits in the last column before the seam (`ilon == nx - 1`), the way
    /// every grid in the original library special-cases its rightmost column.
    pub fn corners(&self, loc: &Location) -> Corners {
        let (ilon, ilat) = (loc.ilon, loc.ilat);
        if ilon == self.nx - 1 {
            Corners {
                a: (ilon, ilat),
                b: (0, ilat),
                c: (ilon, ilat + 1),
                d: (0, ilat + 1),
            }
        } else {
            Corners {
                a: (ilon, ilat),
                b: (ilon + 1, ilat),
                c: (ilon, ilat + 1),
                d: (ilon + 1, ilat + 1),
            }
        }
    }

    /// Flattens an `(ilon, ilat)` cell index into a single row-major offset.
    pub fn flat_index(&self, ilon: i32, ilat: i32) -> usize {
        (ilat as usize) * (self.nx as usize) + (ilon as usize)
    }

    pub fn len(&self) -> usize {
        (self.nx as usize) * (self.ny as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_degree() -> GridLayout {
        GridLayout {
            nx: 360,
            ny: 181,
            offset_x: 180.0,
            offset_y: 90.0,
            scale: 1.0,
        }
    }

    #[test]
    fn locates_origin() {
        let g = one_degree();
        let loc = g.locate(&GeoPos::new(0.0, 0.0)).unwrap();
        assert_eq!(loc.ilon, 180);
        assert_eq!(loc.ilat, 90);
    }

    #[test]
    fn rejects_top_row() {
        let g = one_degree();
        assert!(g.locate(&GeoPos::new(90.0, 0.0)).is_none());
    }

    #[test]
    fn wraps_east_seam() {
        let g = one_degree();
        let loc = g.locate(&GeoPos::new(0.0, 179.999)).unwrap();
        let corners = g.corners(&loc);
        assert_eq!(corners.b.0, 0);
        assert_eq!(corners.d.0, 0);
    }
}
