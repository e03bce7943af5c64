use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect};

/// A 3x3 affine transform over 2D points, row-major.
///
/// Stateless and passed by value: applying a transform to a config view
/// produces a new rect, it never mutates the input. Only the affine part is
/// meaningful — the bottom row is fixed at `[0, 0, 1]` by every constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    m: [f64; 9],
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: [1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0],
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Scale around a fixed point, e.g. zoom about the cursor position.
    pub fn scale_about(sx: f64, sy: f64, px: f64, py: f64) -> Self {
        Self::translation(-px, -py)
            .then(&Self::scaling(sx, sy))
            .then(&Self::translation(px, py))
    }

    /// Compose: the returned transform applies `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Self {
        let a = &next.m;
        let b = &self.m;
        let mut m = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self { m }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.m[0] * p.x + self.m[1] * p.y + self.m[2],
            self.m[3] * p.x + self.m[4] * p.y + self.m[5],
        )
    }

    /// Transform a rect, returning the axis-aligned bounding box of the
    /// transformed corners. Under pure scale/translate this is exact; a
    /// negative scale still yields a rect with positive extent.
    pub fn apply_rect(&self, r: &Rect) -> Rect {
        let a = self.apply(Point::new(r.x, r.y));
        let b = self.apply(Point::new(r.right(), r.bottom()));
        let x0 = a.x.min(b.x);
        let y0 = a.y.min(b.y);
        Rect::new(x0, y0, (b.x - a.x).abs(), (b.y - a.y).abs())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop() {
        let r = Rect::new(10.0, 1.0, 40.0, 1.0);
        assert_eq!(Transform::identity().apply_rect(&r), r);
    }

    #[test]
    fn translation_moves_origin() {
        let t = Transform::translation(5.0, -2.0);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(6.0, -1.0));
        let r = t.apply_rect(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(r, Rect::new(5.0, -2.0, 10.0, 10.0));
    }

    #[test]
    fn scaling_stretches_extent() {
        let r = Transform::scaling(2.0, 1.0).apply_rect(&Rect::new(1.0, 3.0, 4.0, 5.0));
        assert_eq!(r, Rect::new(2.0, 3.0, 8.0, 5.0));
    }

    #[test]
    fn composition_order_is_self_then_next() {
        // Scale first, then translate: (1,0) -> (2,0) -> (5,0).
        let t = Transform::scaling(2.0, 2.0).then(&Transform::translation(3.0, 0.0));
        assert_eq!(t.apply(Point::new(1.0, 0.0)), Point::new(5.0, 0.0));

        // Opposite order: (1,0) -> (4,0) -> (8,0).
        let t = Transform::translation(3.0, 0.0).then(&Transform::scaling(2.0, 2.0));
        assert_eq!(t.apply(Point::new(1.0, 0.0)), Point::new(8.0, 0.0));
    }

    #[test]
    fn scale_about_keeps_pivot_fixed() {
        let t = Transform::scale_about(2.0, 2.0, 10.0, 10.0);
        assert_eq!(t.apply(Point::new(10.0, 10.0)), Point::new(10.0, 10.0));
        assert_eq!(t.apply(Point::new(11.0, 10.0)), Point::new(12.0, 10.0));
    }

    #[test]
    fn negative_scale_yields_positive_extent() {
        let r = Transform::scaling(-1.0, 1.0).apply_rect(&Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(r, Rect::new(-10.0, 0.0, 10.0, 5.0));
    }
}
