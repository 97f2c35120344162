use super::{Shape, ShapeGeometry};

/// A horizontal slab of shapes replicated over `[y_min_plates, y_max_plates)`.
///
/// Occupancy is the union of `shapes` minus the union of `holes`. Holes only
/// cut the shapes of their own layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub y_min_plates: i32,
    pub y_max_plates: i32,
    pub shapes: Vec<Shape>,
    pub holes: Vec<ShapeGeometry>,
}

impl Layer {
    /// Creates an empty layer spanning `[y_min_plates, y_max_plates)`.
    #[must_use]
    pub fn new(y_min_plates: i32, y_max_plates: i32) -> Self {
        Self {
            y_min_plates,
            y_max_plates,
            shapes: Vec::new(),
            holes: Vec::new(),
        }
    }

    /// Adds a shape. Later shapes win where shapes overlap.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    #[must_use]
    pub fn with_hole(mut self, hole: ShapeGeometry) -> Self {
        self.holes.push(hole);
        self
    }

    /// Returns `true` if any hole covers cell `(i, j)`.
    #[must_use]
    pub fn is_carved(&self, i: i32, j: i32) -> bool {
        self.holes.iter().any(|hole| hole.covers_cell(i, j))
    }
}
