use super::Point2;

/// Even-odd point-in-polygon test by horizontal ray casting.
///
/// The vertex list is treated as implicitly closed. Vertices need not be
/// convex or consistently wound. Returns `false` for fewer than 3 vertices.
#[must_use]
pub fn contains_even_odd(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &points[i];
        let b = &points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns the `(min, max)` corners of the polygon's axis-aligned bounds.
#[must_use]
pub fn bounds(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for pt in &points[1..] {
        min.x = min.x.min(pt.x);
        min.y = min.y.min(pt.y);
        max.x = max.x.max(pt.x);
        max.y = max.y.max(pt.y);
    }
    Some((min, max))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn square_contains_center() {
        assert!(contains_even_odd(&square(4.0), &Point2::new(2.0, 2.0)));
        assert!(!contains_even_odd(&square(4.0), &Point2::new(5.0, 2.0)));
        assert!(!contains_even_odd(&square(4.0), &Point2::new(-0.5, 2.0)));
    }

    #[test]
    fn clockwise_winding_is_equivalent() {
        let cw: Vec<Point2> = square(4.0).into_iter().rev().collect();
        assert!(contains_even_odd(&cw, &Point2::new(1.5, 3.5)));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape: notch between x=1..3 above z=1.
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        assert!(!contains_even_odd(&u, &Point2::new(2.0, 2.5)));
        assert!(contains_even_odd(&u, &Point2::new(0.5, 2.5)));
        assert!(contains_even_odd(&u, &Point2::new(2.0, 0.5)));
    }

    #[test]
    fn self_intersecting_star_uses_even_odd() {
        // Pentagram: the central pentagon is crossed twice, so it is outside.
        let star: Vec<Point2> = (0..5)
            .map(|k| {
                let angle = std::f64::consts::FRAC_PI_2 + f64::from(k * 2) * std::f64::consts::TAU / 5.0;
                Point2::new(10.0 * angle.cos(), 10.0 * angle.sin())
            })
            .collect();
        assert!(!contains_even_odd(&star, &Point2::new(0.0, 0.0)));
        assert!(contains_even_odd(&star, &Point2::new(0.0, 8.0)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)];
        assert!(!contains_even_odd(&line, &Point2::new(2.0, 2.0)));
        assert!(!contains_even_odd(&[], &Point2::new(0.0, 0.0)));
    }

    #[test]
    fn bounds_of_triangle() {
        let tri = vec![
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 0.5),
            Point2::new(3.0, 2.0),
        ];
        let (min, max) = bounds(&tri).unwrap();
        assert!((min.x + 2.0).abs() < f64::EPSILON);
        assert!((min.y - 0.5).abs() < f64::EPSILON);
        assert!((max.x - 3.0).abs() < f64::EPSILON);
        assert!((max.y - 5.0).abs() < f64::EPSILON);
        assert!(bounds(&[]).is_none());
    }
}
