use crate::math::{cell_center, polygon_2d, Point2, CELL_CENTER};

/// Geometry of a 2-D shape on the horizontal (x, z) plane.
///
/// Used both for colored shapes and for holes, which carry no color.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// Axis-aligned rectangle covering `[x, x + width) x [z, z + depth)`.
    Rect {
        x: f64,
        z: f64,
        width: f64,
        depth: f64,
    },
    /// Disc of `radius` around the center (boundary inclusive).
    Circle {
        center_x: f64,
        center_z: f64,
        radius: f64,
    },
    /// Axis-aligned ellipse with independent radii.
    Oval {
        center_x: f64,
        center_z: f64,
        radius_x: f64,
        radius_z: f64,
    },
    /// Closed polygon, evaluated with the even-odd rule. Point `y` is grid z.
    Polygon { points: Vec<Point2> },
}

impl ShapeGeometry {
    /// Membership predicate at a sample point.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        match self {
            Self::Rect { x, z, width, depth } => {
                *x <= p.x && p.x < x + width && *z <= p.y && p.y < z + depth
            }
            Self::Circle {
                center_x,
                center_z,
                radius,
            } => {
                let dx = p.x - center_x;
                let dz = p.y - center_z;
                dx * dx + dz * dz <= radius * radius
            }
            Self::Oval {
                center_x,
                center_z,
                radius_x,
                radius_z,
            } => {
                let nx = (p.x - center_x) / radius_x;
                let nz = (p.y - center_z) / radius_z;
                nx * nx + nz * nz <= 1.0
            }
            Self::Polygon { points } => polygon_2d::contains_even_odd(points, p),
        }
    }

    /// Returns `true` if the center of cell `(i, j)` is inside the shape.
    #[must_use]
    pub fn covers_cell(&self, i: i32, j: i32) -> bool {
        self.contains(&cell_center(i, j))
    }

    /// Real-valued `(min, max)` bounds, or `None` for degenerate geometry.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        match self {
            Self::Rect { x, z, width, depth } => (*width > 0.0 && *depth > 0.0)
                .then(|| (Point2::new(*x, *z), Point2::new(x + width, z + depth))),
            Self::Circle {
                center_x,
                center_z,
                radius,
            } => (*radius > 0.0).then(|| {
                (
                    Point2::new(center_x - radius, center_z - radius),
                    Point2::new(center_x + radius, center_z + radius),
                )
            }),
            Self::Oval {
                center_x,
                center_z,
                radius_x,
                radius_z,
            } => (*radius_x > 0.0 && *radius_z > 0.0).then(|| {
                (
                    Point2::new(center_x - radius_x, center_z - radius_z),
                    Point2::new(center_x + radius_x, center_z + radius_z),
                )
            }),
            Self::Polygon { points } if points.len() >= 3 => polygon_2d::bounds(points),
            Self::Polygon { .. } => None,
        }
    }

    /// Candidate cells whose centers can fall inside the shape.
    #[must_use]
    pub fn cell_range(&self) -> Option<CellRange> {
        let (min, max) = self.bounds()?;
        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }
        CellRange::new(
            to_cell(min.x - CELL_CENTER, f64::ceil),
            to_cell(max.x - CELL_CENTER, f64::floor),
            to_cell(min.y - CELL_CENTER, f64::ceil),
            to_cell(max.y - CELL_CENTER, f64::floor),
        )
    }

    /// Short lowercase name of the shape kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Oval { .. } => "oval",
            Self::Polygon { .. } => "polygon",
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_cell(v: f64, round: fn(f64) -> f64) -> i32 {
    // Saturating float-to-int cast.
    round(v) as i32
}

/// A colored shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub geometry: ShapeGeometry,
    pub color: String,
}

impl Shape {
    #[must_use]
    pub fn new(geometry: ShapeGeometry, color: impl Into<String>) -> Self {
        Self {
            geometry,
            color: color.into(),
        }
    }

    #[must_use]
    pub fn rect(x: f64, z: f64, width: f64, depth: f64, color: impl Into<String>) -> Self {
        Self::new(ShapeGeometry::Rect { x, z, width, depth }, color)
    }

    #[must_use]
    pub fn circle(center_x: f64, center_z: f64, radius: f64, color: impl Into<String>) -> Self {
        Self::new(
            ShapeGeometry::Circle {
                center_x,
                center_z,
                radius,
            },
            color,
        )
    }

    #[must_use]
    pub fn oval(
        center_x: f64,
        center_z: f64,
        radius_x: f64,
        radius_z: f64,
        color: impl Into<String>,
    ) -> Self {
        Self::new(
            ShapeGeometry::Oval {
                center_x,
                center_z,
                radius_x,
                radius_z,
            },
            color,
        )
    }

    #[must_use]
    pub fn polygon(points: Vec<Point2>, color: impl Into<String>) -> Self {
        Self::new(ShapeGeometry::Polygon { points }, color)
    }
}

/// Inclusive range of cell indices on the x and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub x_min: i32,
    pub x_max: i32,
    pub z_min: i32,
    pub z_max: i32,
}

impl CellRange {
    /// Creates a range, or `None` if it is empty.
    #[must_use]
    pub fn new(x_min: i32, x_max: i32, z_min: i32, z_max: i32) -> Option<Self> {
        (x_min <= x_max && z_min <= z_max).then_some(Self {
            x_min,
            x_max,
            z_min,
            z_max,
        })
    }

    /// Intersects the range with `[0, width) x [0, depth)`.
    #[must_use]
    pub fn clipped(self, width: i32, depth: i32) -> Option<Self> {
        Self::new(
            self.x_min.max(0),
            self.x_max.min(width - 1),
            self.z_min.max(0),
            self.z_max.min(depth - 1),
        )
    }

    /// Iterates cells in row-major `(z, x)` order, yielding `(x, z)`.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.z_min..=self.z_max).flat_map(move |z| (self.x_min..=self.x_max).map(move |x| (x, z)))
    }
}
