//! Per-object affine transform (row-vector convention).

use crate::graphics::Point;

/// 3×3 matrix applied to raw record coordinates.
///
/// Points are row vectors: `x' = e00·x + e10·y + e20`,
/// `y' = e01·x + e11·y + e21`. The third column holds the taper
/// (perspective) terms, which are stored but not applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    pub element: [[f64; 3]; 3],
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformMatrix {
    pub const fn identity() -> Self {
        Self {
            element: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let e = &self.element;
        (
            e[0][0] * x + e[1][0] * y + e[2][0],
            e[0][1] * x + e[1][1] * y + e[2][1],
        )
    }

    pub fn apply_point(&self, p: Point) -> Point {
        let (x, y) = self.apply(p.x, p.y);
        Point::new(x, y)
    }

    /// Transform applying `self` first, then `next`.
    pub fn then(&self, next: &TransformMatrix) -> TransformMatrix {
        let a = &self.element;
        let b = &next.element;
        let mut element = [[0.0; 3]; 3];
        for (i, row) in element.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        TransformMatrix { element }
    }
}
