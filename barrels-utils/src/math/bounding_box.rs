//! Axis-aligned bounding boxes.

use std::fmt::{self, Display};

use super::Vector3;

/// An axis-aligned box described by its minimum and maximum corners.
///
/// Containment is half-open: a point on the minimum face is inside, a point on
/// the maximum face is not. Adjacent boxes therefore never both claim a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// The minimum corner.
    pub min: Vector3<f64>,
    /// The maximum corner.
    pub max: Vector3<f64>,
}

impl BoundingBox {
    /// Creates a box from two corners, sorting each axis.
    #[must_use]
    pub fn new(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self {
            min: Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// The unit cube occupied by the block at the given integer coordinates.
    #[must_use]
    pub fn of_block(block: Vector3<i32>) -> Self {
        let min: Vector3<f64> = block.into();
        Self {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Grows the box by `margin` on every side.
    #[must_use]
    pub fn inflate(self, margin: f64) -> Self {
        let delta = Vector3::new(margin, margin, margin);
        Self::new(self.min - delta, self.max + delta)
    }

    /// Returns true if the point lies within this box.
    #[must_use]
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
            && point.z >= self.min.z
            && point.z < self.max.z
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}] -> [{}, {}, {}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflated_block_bounds() {
        let area = BoundingBox::of_block(Vector3::new(10, 64, 10)).inflate(0.5);
        assert_eq!(area.min, Vector3::new(9.5, 63.5, 9.5));
        assert_eq!(area.max, Vector3::new(11.5, 65.5, 11.5));
    }

    #[test]
    fn test_contains_is_half_open() {
        let area = BoundingBox::of_block(Vector3::new(0, 0, 0));
        assert!(area.contains(Vector3::new(0.0, 0.0, 0.0)));
        assert!(area.contains(Vector3::new(0.999, 0.5, 0.5)));
        assert!(!area.contains(Vector3::new(1.0, 0.5, 0.5)));
        assert!(!area.contains(Vector3::new(0.5, -0.001, 0.5)));
    }
}
