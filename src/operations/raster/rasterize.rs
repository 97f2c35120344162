use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::model::{BoundingBox, Layer, VoxelCoord, VoxelSet};

/// Rasterizes layered 2-D shapes into a colored voxel set.
///
/// A cell belongs to a shape when the shape contains the cell's center.
/// Within a layer the last shape covering a cell sets its color, and holes
/// remove cells from the layer's union of shapes. Each accepted cell is
/// replicated over the layer's plate range. Everything is clipped to the
/// bounding box; geometry entirely outside it contributes nothing.
#[derive(Debug, Clone)]
pub struct Rasterize {
    bounding_box: BoundingBox,
    layers: Vec<Layer>,
}

impl Rasterize {
    /// Creates a new `Rasterize` operation.
    #[must_use]
    pub fn new(bounding_box: BoundingBox, layers: Vec<Layer>) -> Self {
        Self {
            bounding_box,
            layers,
        }
    }

    /// Executes the rasterization.
    #[must_use]
    pub fn execute(&self) -> VoxelSet {
        let mut voxels = VoxelSet::new();
        let height = self.bounding_box.height_i32();

        for (index, layer) in self.layers.iter().enumerate() {
            let y_lo = layer.y_min_plates.max(0);
            let y_hi = layer.y_max_plates.min(height);
            if y_lo >= y_hi {
                trace!(layer = index, "layer outside vertical range");
                continue;
            }

            let footprint = self.footprint(layer);
            trace!(
                layer = index,
                cells = footprint.len(),
                plates = y_hi - y_lo,
                "rasterized layer"
            );
            for y in y_lo..y_hi {
                for (&(z, x), color) in &footprint {
                    voxels.insert(VoxelCoord::new(x, y, z), *color);
                }
            }
        }

        debug!(
            layers = self.layers.len(),
            voxels = voxels.len(),
            "rasterized model"
        );
        voxels
    }

    /// Computes the layer's colored cells keyed by `(z, x)`.
    fn footprint<'a>(&self, layer: &'a Layer) -> BTreeMap<(i32, i32), &'a str> {
        let width = self.bounding_box.width_i32();
        let depth = self.bounding_box.depth_i32();
        let mut cells = BTreeMap::new();

        for shape in &layer.shapes {
            let Some(range) = shape
                .geometry
                .cell_range()
                .and_then(|r| r.clipped(width, depth))
            else {
                continue;
            };
            for (x, z) in range.cells() {
                if shape.geometry.covers_cell(x, z) {
                    // Last shape wins on overlap.
                    cells.insert((z, x), shape.color.as_str());
                }
            }
        }

        if !layer.holes.is_empty() {
            cells.retain(|&(z, x), _| !layer.is_carved(x, z));
        }
        cells
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;
    use crate::model::{Shape, ShapeGeometry};

    fn rasterize(bbox: BoundingBox, layers: Vec<Layer>) -> VoxelSet {
        Rasterize::new(bbox, layers).execute()
    }

    #[test]
    fn rect_fills_width_times_depth_times_height() {
        let bbox = BoundingBox::new(16, 16, 8);
        for (w, d, h) in [(1, 1, 1), (4, 3, 2), (7, 5, 3), (16, 16, 8)] {
            let layer = Layer::new(0, h).with_shape(Shape::rect(0.0, 0.0, f64::from(w), f64::from(d), "gray"));
            let voxels = rasterize(bbox, vec![layer]);
            assert_eq!(voxels.len(), usize::try_from(w * d * h).unwrap());
        }
    }

    #[test]
    fn circle_area_within_tolerance() {
        let bbox = BoundingBox::new(40, 40, 1);
        for r in [3.0, 5.0, 8.0, 12.0] {
            let layer = Layer::new(0, 1).with_shape(Shape::circle(20.0, 20.0, r, "white"));
            let count = rasterize(bbox, vec![layer]).len();
            #[allow(clippy::cast_precision_loss)]
            let count = count as f64;
            assert_relative_eq!(count, PI * r * r, max_relative = 0.15);
        }
    }

    #[test]
    fn oval_area_within_tolerance() {
        let bbox = BoundingBox::new(40, 40, 1);
        let layer = Layer::new(0, 1).with_shape(Shape::oval(20.0, 20.0, 10.0, 5.0, "white"));
        #[allow(clippy::cast_precision_loss)]
        let count = rasterize(bbox, vec![layer]).len() as f64;
        assert_relative_eq!(count, PI * 50.0, max_relative = 0.15);
    }

    #[test]
    fn rect_hole_subtracts_exactly() {
        let bbox = BoundingBox::new(20, 20, 3);
        let layer = Layer::new(0, 3)
            .with_shape(Shape::rect(2.0, 2.0, 10.0, 8.0, "red"))
            .with_hole(ShapeGeometry::Rect {
                x: 4.0,
                z: 4.0,
                width: 3.0,
                depth: 2.0,
            });
        let voxels = rasterize(bbox, vec![layer]);
        for y in 0..3 {
            assert_eq!(voxels.count_in_layer(y), 80 - 6);
        }
        assert!(!voxels.contains(VoxelCoord::new(4, 0, 4)));
        assert!(voxels.contains(VoxelCoord::new(3, 0, 4)));
    }

    #[test]
    fn background_rect_minus_centered_circle() {
        let bbox = BoundingBox::new(20, 20, 12);
        let layer = Layer::new(0, 1)
            .with_shape(Shape::rect(0.0, 0.0, 20.0, 20.0, "gray"))
            .with_hole(ShapeGeometry::Circle {
                center_x: 10.0,
                center_z: 10.0,
                radius: 5.0,
            });
        let count = rasterize(bbox, vec![layer]).len();
        assert!(count > 310 && count < 330, "count = {count}");
    }

    #[test]
    fn corner_rect_loses_quarter_disc() {
        let bbox = BoundingBox::new(20, 20, 1);
        let layer = Layer::new(0, 1)
            .with_shape(Shape::rect(0.0, 0.0, 10.0, 10.0, "gray"))
            .with_hole(ShapeGeometry::Circle {
                center_x: 10.0,
                center_z: 10.0,
                radius: 5.0,
            });
        assert_eq!(rasterize(bbox, vec![layer]).len(), 100 - 20);
    }

    #[test]
    fn clipping_keeps_in_box_intersection() {
        let bbox = BoundingBox::new(10, 6, 4);
        let layers = vec![
            Layer::new(-2, 2).with_shape(Shape::rect(-3.0, 4.0, 5.0, 10.0, "red")),
            Layer::new(3, 9).with_shape(Shape::circle(9.0, 0.0, 4.0, "blue")),
        ];
        let voxels = rasterize(bbox, layers);
        assert!(!voxels.is_empty());
        assert!(voxels.iter().all(|(c, _)| bbox.contains(c)));
        // Rect keeps x in [0, 2), z in [4, 6), y in [0, 2).
        let red = voxels.iter().filter(|(_, color)| *color == "red").count();
        assert_eq!(red, 2 * 2 * 2);
    }

    #[test]
    fn shape_outside_box_yields_nothing() {
        let bbox = BoundingBox::new(10, 10, 2);
        let layer = Layer::new(0, 2)
            .with_shape(Shape::rect(50.0, 50.0, 4.0, 4.0, "sky"))
            .with_shape(Shape::circle(-20.0, 5.0, 3.0, "sky"));
        assert!(rasterize(bbox, vec![layer]).is_empty());
    }

    // Overlap tie-break: later shapes in the list win. This policy is a
    // documented choice; keep this test if it ever changes.
    #[test]
    fn overlapping_shapes_last_wins() {
        let bbox = BoundingBox::new(10, 10, 1);
        let layer = Layer::new(0, 1)
            .with_shape(Shape::rect(0.0, 0.0, 6.0, 6.0, "red"))
            .with_shape(Shape::rect(3.0, 3.0, 6.0, 6.0, "blue"));
        let voxels = rasterize(bbox, vec![layer]);
        assert_eq!(voxels.color_at(VoxelCoord::new(4, 0, 4)), Some("blue"));
        assert_eq!(voxels.color_at(VoxelCoord::new(1, 0, 1)), Some("red"));
        assert_eq!(voxels.len(), 36 + 36 - 9);
    }

    #[test]
    fn holes_only_cut_their_own_layer() {
        let bbox = BoundingBox::new(8, 8, 4);
        let layers = vec![
            Layer::new(0, 4).with_shape(Shape::rect(0.0, 0.0, 4.0, 4.0, "red")),
            Layer::new(2, 4)
                .with_shape(Shape::rect(4.0, 0.0, 4.0, 4.0, "blue"))
                .with_hole(ShapeGeometry::Rect {
                    x: 0.0,
                    z: 0.0,
                    width: 8.0,
                    depth: 1.0,
                }),
        ];
        let voxels = rasterize(bbox, layers);
        assert!(voxels.contains(VoxelCoord::new(0, 3, 0)));
        assert!(!voxels.contains(VoxelCoord::new(5, 3, 0)));
        assert!(voxels.contains(VoxelCoord::new(5, 3, 1)));
    }

    #[test]
    fn concave_polygon_rasterizes_notch() {
        let bbox = BoundingBox::new(6, 6, 1);
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(6.0, 6.0),
            Point2::new(4.0, 6.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 6.0),
            Point2::new(0.0, 6.0),
        ];
        let layer = Layer::new(0, 1).with_shape(Shape::polygon(u, "green"));
        let voxels = rasterize(bbox, vec![layer]);
        assert_eq!(voxels.len(), 36 - 8);
        assert!(!voxels.contains(VoxelCoord::new(2, 0, 3)));
        assert!(voxels.contains(VoxelCoord::new(2, 0, 1)));
    }

    #[test]
    fn inverted_layer_range_is_empty() {
        let bbox = BoundingBox::new(4, 4, 4);
        let layer = Layer::new(3, 1).with_shape(Shape::rect(0.0, 0.0, 4.0, 4.0, "red"));
        assert!(rasterize(bbox, vec![layer]).is_empty());
    }
}
