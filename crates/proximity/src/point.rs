//! Weighted 2D points.

use std::collections::HashSet;

use crate::error::ProximityError;

/// A located, weighted member of the universe S.
///
/// Points are plain values owned by the caller. Every other structure in the
/// workspace refers to them by their position in the caller's slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    id: u64,
    x: f64,
    y: f64,
    weight: f64,
}

impl Point {
    /// Creates a new point. Use [`validate_points`] to check a whole set.
    pub fn new(id: u64, x: f64, y: f64, weight: f64) -> Self {
        Self { id, x, y, weight }
    }

    /// Returns the identifier, unique within its set.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the intrinsic weight (relevance).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Checks that every point is finite and that ids are unique.
///
/// # Errors
///
/// Returns [`ProximityError::NonFiniteInput`] for the first NaN/infinite field
/// and [`ProximityError::DuplicateId`] for the first repeated id.
pub fn validate_points(points: &[Point]) -> Result<(), ProximityError> {
    let mut seen = HashSet::with_capacity(points.len());
    for p in points {
        for (field, v) in [("x", p.x), ("y", p.y), ("weight", p.weight)] {
            if !v.is_finite() {
                return Err(ProximityError::NonFiniteInput { id: p.id, field });
            }
        }
        if !seen.insert(p.id) {
            return Err(ProximityError::DuplicateId { id: p.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_accessors() {
        let p = Point::new(4, 1.5, -2.0, 0.25);
        assert_eq!(p.id(), 4);
        assert_eq!(p.x(), 1.5);
        assert_eq!(p.y(), -2.0);
        assert_eq!(p.weight(), 0.25);
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0, 0.0, 0.0, 1.0);
        let b = Point::new(1, 3.0, 4.0, 1.0);
        assert_abs_diff_eq!(a.distance(&b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.distance(&a), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_ok() {
        let pts = [Point::new(0, 0.0, 0.0, 1.0), Point::new(1, 1.0, 1.0, -3.0)];
        assert!(validate_points(&pts).is_ok());
        assert!(validate_points(&[]).is_ok());
    }

    #[test]
    fn test_validate_non_finite() {
        let pts = [Point::new(0, 0.0, f64::NAN, 1.0)];
        assert!(matches!(
            validate_points(&pts),
            Err(ProximityError::NonFiniteInput { id: 0, field: "y" })
        ));

        let pts = [Point::new(9, 0.0, 0.0, f64::INFINITY)];
        assert!(matches!(
            validate_points(&pts),
            Err(ProximityError::NonFiniteInput {
                id: 9,
                field: "weight"
            })
        ));
    }

    #[test]
    fn test_validate_duplicate() {
        let pts = [
            Point::new(1, 0.0, 0.0, 1.0),
            Point::new(2, 1.0, 0.0, 1.0),
            Point::new(1, 2.0, 0.0, 1.0),
        ];
        assert!(matches!(
            validate_points(&pts),
            Err(ProximityError::DuplicateId { id: 1 })
        ));
    }
}
