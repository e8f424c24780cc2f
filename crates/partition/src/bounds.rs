//! Axis-aligned rectangles.

use hpfr_proximity::Point;

/// A closed axis-aligned rectangle `[min_x, max_x] × [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a rectangle from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Tight bounding box of `points`, or `None` when empty.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.x(), first.y(), first.x(), first.y());
        Some(points[1..].iter().fold(init, |b, p| b.expand(p.x(), p.y())))
    }

    fn expand(self, x: f64, y: f64) -> Self {
        Self {
            min_x: self.min_x.min(x),
            min_y: self.min_y.min(y),
            max_x: self.max_x.max(x),
            max_y: self.max_y.max(y),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Centre of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// The four equal quadrants in SW, SE, NW, NE order.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let (cx, cy) = self.center();
        [
            Self::new(self.min_x, self.min_y, cx, cy),
            Self::new(cx, self.min_y, self.max_x, cy),
            Self::new(self.min_x, cy, cx, self.max_y),
            Self::new(cx, cy, self.max_x, self.max_y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_points() {
        let pts = [
            Point::new(0, 2.0, -1.0, 1.0),
            Point::new(1, -3.0, 4.0, 1.0),
            Point::new(2, 0.5, 0.5, 1.0),
        ];
        let b = Bounds::of_points(&pts).unwrap();
        assert_eq!(b, Bounds::new(-3.0, -1.0, 2.0, 4.0));
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 5.0);
        assert!(Bounds::of_points(&[]).is_none());
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let b = Bounds::new(0.0, 0.0, 4.0, 2.0);
        let q = b.quadrants();
        assert_eq!(q[0], Bounds::new(0.0, 0.0, 2.0, 1.0));
        assert_eq!(q[1], Bounds::new(2.0, 0.0, 4.0, 1.0));
        assert_eq!(q[2], Bounds::new(0.0, 1.0, 2.0, 2.0));
        assert_eq!(q[3], Bounds::new(2.0, 1.0, 4.0, 2.0));
        let area: f64 = q.iter().map(|c| c.width() * c.height()).sum();
        assert_eq!(area, b.width() * b.height());
    }

    #[test]
    fn test_contains_inclusive() {
        let b = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(1.0, 1.0));
        assert!(!b.contains(1.0001, 0.5));
    }
}
