use tracing::debug;

use super::SymmetryAxes;
use crate::model::{BoundingBox, VoxelCoord, VoxelSet};

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Z,
}

impl Axis {
    fn get(self, c: VoxelCoord) -> i32 {
        match self {
            Self::X => c.x,
            Self::Z => c.z,
        }
    }

    fn with(self, c: VoxelCoord, v: i32) -> VoxelCoord {
        match self {
            Self::X => VoxelCoord::new(v, c.y, c.z),
            Self::Z => VoxelCoord::new(c.x, c.y, v),
        }
    }
}

/// Centers a voxel set inside its bounding box and mirrors it across the
/// box's center line on the selected axes.
///
/// The x axis is processed before z, so selecting both yields four-fold
/// symmetry. At the mirror line the original voxel's color wins. Applying
/// the operation twice gives the same set as applying it once.
///
/// Input voxels outside the bounding box are dropped before centering.
#[derive(Debug, Clone, Copy)]
pub struct EnforceSymmetry {
    bounding_box: BoundingBox,
    axes: SymmetryAxes,
}

impl EnforceSymmetry {
    /// Creates a new `EnforceSymmetry` operation.
    #[must_use]
    pub fn new(bounding_box: BoundingBox, axes: SymmetryAxes) -> Self {
        Self { bounding_box, axes }
    }

    /// Executes the operation, returning the symmetric voxel set.
    #[must_use]
    pub fn execute(&self, voxels: &VoxelSet) -> VoxelSet {
        if self.axes.is_none() || voxels.is_empty() {
            return voxels.clone();
        }

        let mut out = voxels.clone();
        out.retain_within(&self.bounding_box);
        if self.axes.x {
            out = self.center(&out, Axis::X);
            out = self.mirror(&out, Axis::X);
        }
        if self.axes.z {
            out = self.center(&out, Axis::Z);
            out = self.mirror(&out, Axis::Z);
        }

        debug!(
            input = voxels.len(),
            output = out.len(),
            x = self.axes.x,
            z = self.axes.z,
            "enforced symmetry"
        );
        out
    }

    fn dimension(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.bounding_box.width_i32(),
            Axis::Z => self.bounding_box.depth_i32(),
        }
    }

    /// Shifts the set so its occupied extent on `axis` is centered in the box.
    fn center(&self, voxels: &VoxelSet, axis: Axis) -> VoxelSet {
        let Some(extent) = voxels.extent() else {
            return voxels.clone();
        };
        let min = axis.get(extent.min);
        let len = axis.get(extent.max) - min + 1;
        // Floor division biases odd slack toward the low side.
        let target = ((self.dimension(axis) - len) / 2).max(0);
        let shift = target - min;

        let mut shifted = match axis {
            Axis::X => voxels.translated(shift, 0, 0),
            Axis::Z => voxels.translated(0, 0, shift),
        };
        shifted.retain_within(&self.bounding_box);
        shifted
    }

    /// Unions the set with its reflection `c -> dim - 1 - c`.
    fn mirror(&self, voxels: &VoxelSet, axis: Axis) -> VoxelSet {
        let far = self.dimension(axis) - 1;
        let mut out = voxels.clone();
        for (coord, color) in voxels.iter() {
            let reflected = axis.with(coord, far - axis.get(coord));
            out.insert_if_vacant(reflected, color);
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn set(cells: &[(i32, i32, i32, &str)]) -> VoxelSet {
        cells
            .iter()
            .map(|&(x, y, z, c)| (VoxelCoord::new(x, y, z), c.to_owned()))
            .collect()
    }

    fn assert_mirrored_x(voxels: &VoxelSet, width: i32) {
        for (c, _) in voxels.iter() {
            assert!(
                voxels.contains(VoxelCoord::new(width - 1 - c.x, c.y, c.z)),
                "missing mirror of {c:?}"
            );
        }
    }

    #[test]
    fn none_is_identity() {
        let bbox = BoundingBox::new(10, 10, 4);
        let input = set(&[(0, 0, 0, "red"), (3, 1, 7, "blue")]);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::NONE).execute(&input);
        assert_eq!(out, input);
    }

    #[test]
    fn x_symmetry_centers_then_mirrors() {
        let bbox = BoundingBox::new(10, 10, 2);
        // Extent x in [0, 2]: three columns, shifted to start at (10 - 3) / 2 = 3.
        let input = set(&[(0, 0, 1, "red"), (1, 0, 1, "red"), (2, 0, 1, "blue")]);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::X).execute(&input);

        assert_mirrored_x(&out, 10);
        assert!(out.contains(VoxelCoord::new(3, 0, 1)));
        assert!(out.contains(VoxelCoord::new(6, 0, 1)));
        // Original blue at x=5 keeps its color; its reflection at x=4 is the
        // original red cell.
        assert_eq!(out.color_at(VoxelCoord::new(5, 0, 1)), Some("blue"));
        assert_eq!(out.color_at(VoxelCoord::new(4, 0, 1)), Some("red"));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn z_untouched_when_only_x_requested() {
        let bbox = BoundingBox::new(8, 8, 1);
        let input = set(&[(1, 0, 0, "a"), (2, 0, 5, "a")]);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::X).execute(&input);
        let zs: Vec<i32> = out.iter().map(|(c, _)| c.z).collect();
        assert!(zs.iter().all(|z| *z == 0 || *z == 5));
        assert_mirrored_x(&out, 8);
    }

    #[test]
    fn both_axes_give_four_fold_symmetry() {
        let bbox = BoundingBox::new(9, 7, 1);
        let input = set(&[(0, 0, 0, "a"), (1, 0, 0, "a"), (0, 0, 2, "b")]);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::BOTH).execute(&input);
        for (c, _) in out.iter() {
            assert!(out.contains(VoxelCoord::new(8 - c.x, c.y, c.z)));
            assert!(out.contains(VoxelCoord::new(c.x, c.y, 6 - c.z)));
        }
    }

    #[test]
    fn idempotent_for_every_axis_selection() {
        let bbox = BoundingBox::new(12, 9, 3);
        let input = set(&[
            (0, 0, 0, "a"),
            (4, 0, 1, "b"),
            (2, 1, 6, "c"),
            (7, 2, 3, "d"),
        ]);
        for axes in [
            SymmetryAxes::NONE,
            SymmetryAxes::X,
            SymmetryAxes::Z,
            SymmetryAxes::BOTH,
        ] {
            let op = EnforceSymmetry::new(bbox, axes);
            let once = op.execute(&input);
            let twice = op.execute(&once);
            assert_eq!(once, twice, "{axes:?}");
        }
    }

    #[test]
    fn output_stays_inside_box() {
        let bbox = BoundingBox::new(5, 5, 2);
        let input = set(&[(0, 0, 0, "a"), (4, 1, 4, "a"), (3, 0, 2, "a")]);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::BOTH).execute(&input);
        assert!(out.iter().all(|(c, _)| bbox.contains(c)));
    }

    #[test]
    fn empty_set_is_fixed_point() {
        let bbox = BoundingBox::new(5, 5, 2);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::BOTH).execute(&VoxelSet::new());
        assert!(out.is_empty());
    }

    #[test]
    fn voxels_outside_the_box_are_dropped_first() {
        let bbox = BoundingBox::new(6, 6, 2);
        let input = set(&[
            (i32::MIN, 0, 0, "far"),
            (i32::MAX, 1, i32::MIN, "far"),
            (1, 0, 2, "red"),
        ]);
        let out = EnforceSymmetry::new(bbox, SymmetryAxes::BOTH).execute(&input);
        assert!(out.iter().all(|(c, color)| bbox.contains(c) && color == "red"));
        // The red cell is centered to (2, 2) and mirrored on both axes.
        assert_eq!(out.len(), 4);
        assert!(out.contains(VoxelCoord::new(2, 0, 2)));
        assert!(out.contains(VoxelCoord::new(3, 0, 3)));

        let only_far = set(&[(i32::MIN, 0, 0, "far")]);
        assert!(EnforceSymmetry::new(bbox, SymmetryAxes::X).execute(&only_far).is_empty());
    }
}
