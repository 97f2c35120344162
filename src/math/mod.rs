pub mod polygon_2d;

/// 2D point type on the horizontal (x, z) plane.
///
/// The point's `x` maps to grid x and its `y` maps to grid z.
pub type Point2 = nalgebra::Point2<f64>;

/// Offset from a cell's integer corner to its sample point.
pub const CELL_CENTER: f64 = 0.5;

/// Returns the sample point of grid cell `(i, j)`.
#[must_use]
pub fn cell_center(i: i32, j: i32) -> Point2 {
    Point2::new(f64::from(i) + CELL_CENTER, f64::from(j) + CELL_CENTER)
}
