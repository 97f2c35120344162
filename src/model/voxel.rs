use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// Integer coordinate of one grid cell.
///
/// Ordered canonically by `y`, then `z`, then `x`, which is the scan order
/// every stage of the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate shifted by `(dx, dy, dz)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl Ord for VoxelCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.z, self.x).cmp(&(other.y, other.z, other.x))
    }
}

impl PartialOrd for VoxelCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One colored unit cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
}

impl Voxel {
    #[must_use]
    pub fn coord(&self) -> VoxelCoord {
        VoxelCoord::new(self.x, self.y, self.z)
    }
}

/// Inclusive min/max of occupied coordinates on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
}

/// A de-duplicated set of colored voxels.
///
/// At most one color is stored per coordinate; inserting an occupied
/// coordinate replaces its color. Iteration follows [`VoxelCoord`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelSet {
    cells: BTreeMap<VoxelCoord, String>,
}

impl VoxelSet {
    /// Creates an empty voxel set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or recolors a cell. Returns the previous color, if any.
    pub fn insert(&mut self, coord: VoxelCoord, color: impl Into<String>) -> Option<String> {
        self.cells.insert(coord, color.into())
    }

    /// Inserts a cell only if it is not occupied yet. Returns `true` if inserted.
    pub fn insert_if_vacant(&mut self, coord: VoxelCoord, color: &str) -> bool {
        if self.cells.contains_key(&coord) {
            return false;
        }
        self.cells.insert(coord, color.to_owned());
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Returns the color stored at `coord`.
    #[must_use]
    pub fn color_at(&self, coord: VoxelCoord) -> Option<&str> {
        self.cells.get(&coord).map(String::as_str)
    }

    /// Iterates over `(coord, color)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &str)> + '_ {
        self.cells.iter().map(|(c, color)| (*c, color.as_str()))
    }

    /// Iterates over the cells of a single `y` layer in `(z, x)` order.
    pub fn layer(&self, y: i32) -> impl Iterator<Item = (VoxelCoord, &str)> + '_ {
        let lo = VoxelCoord::new(i32::MIN, y, i32::MIN);
        let hi = VoxelCoord::new(i32::MAX, y, i32::MAX);
        self.cells.range(lo..=hi).map(|(c, color)| (*c, color.as_str()))
    }

    /// Returns the distinct occupied `y` values in ascending order.
    #[must_use]
    pub fn layer_ys(&self) -> Vec<i32> {
        let mut ys: Vec<i32> = self.cells.keys().map(|c| c.y).collect();
        ys.dedup();
        ys
    }

    /// Number of occupied cells in layer `y`.
    #[must_use]
    pub fn count_in_layer(&self, y: i32) -> usize {
        self.layer(y).count()
    }

    /// Returns the voxels as owned records, in canonical order.
    #[must_use]
    pub fn to_voxels(&self) -> Vec<Voxel> {
        self.iter()
            .map(|(c, color)| Voxel {
                x: c.x,
                y: c.y,
                z: c.z,
                color: color.to_owned(),
            })
            .collect()
    }

    /// Computes the occupied extent, or `None` for an empty set.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        let mut keys = self.cells.keys();
        let first = *keys.next()?;
        let mut extent = Extent {
            min: first,
            max: first,
        };
        for c in keys {
            extent.min.x = extent.min.x.min(c.x);
            extent.min.y = extent.min.y.min(c.y);
            extent.min.z = extent.min.z.min(c.z);
            extent.max.x = extent.max.x.max(c.x);
            extent.max.y = extent.max.y.max(c.y);
            extent.max.z = extent.max.z.max(c.z);
        }
        Some(extent)
    }

    /// Returns a copy of the set shifted by `(dx, dy, dz)`.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32, dz: i32) -> Self {
        if dx == 0 && dy == 0 && dz == 0 {
            return self.clone();
        }
        self.cells
            .iter()
            .map(|(c, color)| (c.offset(dx, dy, dz), color.clone()))
            .collect()
    }

    /// Drops every cell outside the bounding box envelope.
    pub fn retain_within(&mut self, bbox: &BoundingBox) {
        self.cells.retain(|c, _| bbox.contains(*c));
    }
}

impl FromIterator<(VoxelCoord, String)> for VoxelSet {
    fn from_iter<I: IntoIterator<Item = (VoxelCoord, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Voxel> for VoxelSet {
    fn from_iter<I: IntoIterator<Item = Voxel>>(iter: I) -> Self {
        iter.into_iter().map(|v| (v.coord(), v.color)).collect()
    }
}
