pub mod brick;
pub mod layer;
pub mod shape;
pub mod voxel;

pub use brick::{Brick, BrickRequest};
pub use layer::Layer;
pub use shape::{CellRange, Shape, ShapeGeometry};
pub use voxel::{Extent, Voxel, VoxelCoord, VoxelSet};

use serde::{Deserialize, Serialize};

/// Largest side a footprint may have on both axes at once.
///
/// A brick is valid when at least one of its sides is no larger than this.
pub const MAX_UNSPLIT: u32 = 2;

/// The valid coordinate envelope `[0,width) x [0,height_plates) x [0,depth)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Extent along x, in studs.
    pub width: u32,
    /// Extent along z, in studs.
    pub depth: u32,
    /// Extent along y, in plates.
    pub height_plates: u32,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(width: u32, depth: u32, height_plates: u32) -> Self {
        Self {
            width,
            depth,
            height_plates,
        }
    }

    /// Returns `true` if `coord` lies inside the envelope.
    #[must_use]
    pub fn contains(&self, coord: VoxelCoord) -> bool {
        in_range(coord.x, self.width)
            && in_range(coord.y, self.height_plates)
            && in_range(coord.z, self.depth)
    }

    /// Width as a signed grid coordinate bound.
    #[must_use]
    pub fn width_i32(&self) -> i32 {
        saturate(self.width)
    }

    /// Depth as a signed grid coordinate bound.
    #[must_use]
    pub fn depth_i32(&self) -> i32 {
        saturate(self.depth)
    }

    /// Height as a signed grid coordinate bound.
    #[must_use]
    pub fn height_i32(&self) -> i32 {
        saturate(self.height_plates)
    }
}

fn in_range(v: i32, len: u32) -> bool {
    v >= 0 && v < saturate(len)
}

fn saturate(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
