use serde::{Deserialize, Serialize};

use super::{VoxelCoord, MAX_UNSPLIT};

/// One placed building block.
///
/// `(x, y, z)` is the origin cell; the footprint covers
/// `[x, x + width) x [z, z + depth)` at layer `y`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brick {
    pub width: u32,
    pub depth: u32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
}

impl Brick {
    /// Number of footprint cells.
    #[must_use]
    pub fn area(&self) -> u32 {
        self.width * self.depth
    }

    /// Returns `true` if at least one side is within `limit`.
    #[must_use]
    pub fn fits_limit(&self, limit: u32) -> bool {
        self.width.min(self.depth) <= limit
    }

    /// Returns `true` if the brick satisfies the default footprint rule.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        self.fits_limit(MAX_UNSPLIT)
    }

    /// Iterates the brick's cells in `(z, x)` order.
    pub fn cells(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        footprint_cells(self.x, self.z, self.width, self.depth).map(|(x, z)| VoxelCoord::new(x, self.y, z))
    }
}

/// A placement candidate: requested footprint, position and color.
///
/// Sides are signed so malformed input can be represented and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickRequest {
    pub width: i32,
    pub depth: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
}

impl BrickRequest {
    #[must_use]
    pub fn new(width: i32, depth: i32, x: i32, y: i32, z: i32, color: impl Into<String>) -> Self {
        Self {
            width,
            depth,
            x,
            y,
            z,
            color: color.into(),
        }
    }
}

impl From<&Brick> for BrickRequest {
    fn from(brick: &Brick) -> Self {
        Self {
            width: i32::try_from(brick.width).unwrap_or(i32::MAX),
            depth: i32::try_from(brick.depth).unwrap_or(i32::MAX),
            x: brick.x,
            y: brick.y,
            z: brick.z,
            color: brick.color.clone(),
        }
    }
}

/// Iterates `(x, z)` over a footprint in row-major order, stopping at the
/// edge of the `i32` grid.
pub(crate) fn footprint_cells(x: i32, z: i32, width: u32, depth: u32) -> impl Iterator<Item = (i32, i32)> {
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    let d = i32::try_from(depth).unwrap_or(i32::MAX);
    let xs = (w > 0).then(|| x..=x.saturating_add(w - 1));
    let zs = (d > 0).then(|| z..=z.saturating_add(d - 1));
    zs.into_iter()
        .flatten()
        .flat_map(move |cz| xs.clone().into_iter().flatten().map(move |cx| (cx, cz)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_cover_footprint() {
        let brick = Brick {
            width: 3,
            depth: 2,
            x: 1,
            y: 4,
            z: -1,
            color: "red".into(),
        };
        let cells: Vec<VoxelCoord> = brick.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], VoxelCoord::new(1, 4, -1));
        assert_eq!(cells[5], VoxelCoord::new(3, 4, 0));
        assert!(brick.is_standard());
        assert_eq!(brick.area(), 6);
    }

    #[test]
    fn wide_square_is_not_standard() {
        let brick = Brick {
            width: 3,
            depth: 3,
            x: 0,
            y: 0,
            z: 0,
            color: "red".into(),
        };
        assert!(!brick.is_standard());
        assert!(brick.fits_limit(3));
    }
}
