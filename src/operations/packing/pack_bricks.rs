use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::model::{Brick, VoxelSet};
use crate::params::BuildParams;

/// Direction a candidate rectangle runs along.
#[derive(Debug, Clone, Copy)]
enum Run {
    /// Long side along x, stacked row by row in z.
    AlongX,
    /// Long side along z, stacked column by column in x.
    AlongZ,
}

impl Run {
    /// Unit step along the long side.
    const fn step(self) -> (i32, i32) {
        match self {
            Self::AlongX => (1, 0),
            Self::AlongZ => (0, 1),
        }
    }

    /// Origin of strip `k` of a rectangle anchored at `(x, z)`.
    fn strip_origin(self, x: i32, z: i32, k: i32) -> Option<(i32, i32)> {
        match self {
            Self::AlongX => Some((x, z.checked_add(k)?)),
            Self::AlongZ => Some((x.checked_add(k)?, z)),
        }
    }
}

/// Packs a voxel set into bricks, one `y` layer at a time.
///
/// # Algorithm
///
/// Cells of a layer are scanned row-major (ascending `z`, then `x`). At each
/// unclaimed cell, rectangles anchored there are evaluated: runs along x that
/// are 1 to `max_unsplit` rows deep, and runs along z that are 1 to
/// `max_unsplit` columns wide. Runs extend as far as unclaimed cells of the
/// same color allow. The largest rectangle wins, preferring the deeper run
/// and x over z on ties. Its cells are claimed and the brick is emitted.
///
/// Strips are measured once per anchor and measuring stops at the first
/// empty strip.
///
/// Bricks therefore never mix colors, never span layers, always have one
/// side within `max_unsplit`, and are emitted in ascending `(y, z, x)` order
/// of their origin. Minimal brick count is not guaranteed.
#[derive(Debug, Clone, Copy)]
pub struct PackBricks {
    max_unsplit: u32,
    max_length: Option<u32>,
}

impl PackBricks {
    /// Creates a new `PackBricks` operation.
    #[must_use]
    pub fn new(params: &BuildParams) -> Self {
        Self {
            max_unsplit: params.max_unsplit.max(1),
            max_length: params.max_length,
        }
    }

    /// Executes the packing.
    #[must_use]
    pub fn execute(&self, voxels: &VoxelSet) -> Vec<Brick> {
        let mut bricks = Vec::new();
        for y in voxels.layer_ys() {
            let before = bricks.len();
            LayerPacker::new(voxels, y, self).pack_into(&mut bricks);
            trace!(
                y,
                cells = voxels.count_in_layer(y),
                bricks = bricks.len() - before,
                "packed layer"
            );
        }
        debug!(voxels = voxels.len(), bricks = bricks.len(), "packed bricks");
        bricks
    }
}

/// Greedy packer state for a single layer.
struct LayerPacker<'a> {
    y: i32,
    op: &'a PackBricks,
    order: Vec<(i32, i32)>,
    colors: HashMap<(i32, i32), &'a str>,
    claimed: HashSet<(i32, i32)>,
}

impl<'a> LayerPacker<'a> {
    fn new(voxels: &'a VoxelSet, y: i32, op: &'a PackBricks) -> Self {
        let mut order = Vec::new();
        let mut colors = HashMap::new();
        for (c, color) in voxels.layer(y) {
            order.push((c.x, c.z));
            colors.insert((c.x, c.z), color);
        }
        Self {
            y,
            op,
            order,
            colors,
            claimed: HashSet::new(),
        }
    }

    fn pack_into(mut self, bricks: &mut Vec<Brick>) {
        let order = std::mem::take(&mut self.order);
        for (x, z) in order {
            if self.claimed.contains(&(x, z)) {
                continue;
            }
            let Some(color) = self.colors.get(&(x, z)).copied() else {
                continue;
            };

            let (width, depth) = self.best_rectangle(x, z, color);
            for (cx, cz) in crate::model::brick::footprint_cells(x, z, width, depth) {
                self.claimed.insert((cx, cz));
            }
            bricks.push(Brick {
                width,
                depth,
                x,
                y: self.y,
                z,
                color: color.to_owned(),
            });
        }
    }

    /// Picks the largest `(width, depth)` anchored at `(x, z)`.
    ///
    /// Candidates are ranked deepest first, x before z; a later candidate
    /// replaces the best only with a strictly larger area.
    fn best_rectangle(&self, x: i32, z: i32, color: &str) -> (u32, u32) {
        let along_x = self.strip_lengths(x, z, color, Run::AlongX);
        let along_z = self.strip_lengths(x, z, color, Run::AlongZ);
        let deepest = along_x.len().max(along_z.len());

        let mut best = (1, 1);
        let mut best_area = 1_u64;
        for k in (1..=deepest).rev() {
            let strips = u32::try_from(k).unwrap_or(u32::MAX);
            let candidates = [
                along_x.get(k - 1).map(|&len| (len, strips)),
                along_z.get(k - 1).map(|&len| (strips, len)),
            ];
            for (width, depth) in candidates.into_iter().flatten() {
                let area = u64::from(width) * u64::from(depth);
                if area > best_area {
                    best = (width, depth);
                    best_area = area;
                }
            }
        }
        best
    }

    /// Usable length of a rectangle `k + 1` strips deep, for each `k`.
    ///
    /// Entry `k` is the shortest run among strips `0..=k`. Measuring stops at
    /// `max_unsplit` strips or at the first strip with no free cell, since no
    /// deeper rectangle can be claimed past it.
    fn strip_lengths(&self, x: i32, z: i32, color: &str, run: Run) -> Vec<u32> {
        let mut lengths = Vec::new();
        let mut shortest = u32::MAX;
        for k in 0..self.op.max_unsplit {
            let Some((sx, sz)) = i32::try_from(k).ok().and_then(|k| run.strip_origin(x, z, k)) else {
                break;
            };
            let len = self.run_length(sx, sz, run, color).min(shortest);
            if len == 0 {
                break;
            }
            shortest = len;
            lengths.push(len);
        }
        lengths
    }

    fn is_free(&self, x: i32, z: i32, color: &str) -> bool {
        !self.claimed.contains(&(x, z)) && self.colors.get(&(x, z)).is_some_and(|c| *c == color)
    }

    /// Length of the free same-color run starting at `(x, z)` along `run`,
    /// capped by `max_length`.
    fn run_length(&self, x: i32, z: i32, run: Run, color: &str) -> u32 {
        let cap = self.op.max_length.unwrap_or(u32::MAX);
        let (dx, dz) = run.step();
        let mut cell = Some((x, z));
        let mut len = 0;
        while let Some((cx, cz)) = cell {
            if len >= cap || !self.is_free(cx, cz, color) {
                break;
            }
            len += 1;
            cell = cx.checked_add(dx).zip(cz.checked_add(dz));
        }
        len
    }
}
