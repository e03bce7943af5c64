use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in a view's logical coordinate space.
///
/// This is the representation of a config view: the region of the model a
/// canvas view currently displays. Plain value type — ownership of "the"
/// config view of a canvas lives in `emberpane-core`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn with_x(&self, x: f64) -> Self {
        Self { x, ..*self }
    }

    pub fn with_y(&self, y: f64) -> Self {
        Self { y, ..*self }
    }

    pub fn with_width(&self, w: f64) -> Self {
        Self { w, ..*self }
    }

    pub fn with_height(&self, h: f64) -> Self {
        Self { h, ..*self }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Clamp this rect into `bounds`, enforcing `min_width` as the smallest
    /// allowed width. Non-finite components collapse to the bounds; a rect
    /// wider/taller than the bounds is shrunk to fit. Never panics.
    pub fn clamped_within(&self, bounds: &Rect, min_width: f64) -> Self {
        let floor = if min_width.is_finite() && min_width > 0.0 {
            min_width.min(bounds.w)
        } else {
            0.0
        };

        let w = if self.w.is_finite() {
            self.w.clamp(floor, bounds.w)
        } else {
            bounds.w
        };
        let h = if self.h.is_finite() && self.h > 0.0 {
            self.h.min(bounds.h)
        } else {
            bounds.h
        };
        let x = if self.x.is_finite() {
            self.x.clamp(bounds.x, bounds.right() - w)
        } else {
            bounds.x
        };
        let y = if self.y.is_finite() {
            self.y.clamp(bounds.y, bounds.bottom() - h)
        } else {
            bounds.y
        };

        Self { x, y, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 10.0)
    }

    #[test]
    fn axis_accessors() {
        let r = Rect::new(10.0, 1.0, 40.0, 1.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 2.0);
        assert_eq!(r.with_height(3.0), Rect::new(10.0, 1.0, 40.0, 3.0));
    }

    #[test]
    fn containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains_rect(&Rect::new(90.0, 0.0, 20.0, 10.0)));
        assert!(outer.contains_point(Point::new(100.0, 100.0)));
    }

    #[test]
    fn overlap_is_exclusive_at_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 5.0, 5.0)));
    }

    #[test]
    fn clamp_keeps_rect_inside_bounds() {
        let r = Rect::new(-20.0, 5.0, 30.0, 2.0).clamped_within(&space(), 1.0);
        assert_eq!(r, Rect::new(0.0, 5.0, 30.0, 2.0));

        let r = Rect::new(90.0, 0.0, 30.0, 2.0).clamped_within(&space(), 1.0);
        assert_eq!(r, Rect::new(70.0, 0.0, 30.0, 2.0));
    }

    #[test]
    fn clamp_enforces_min_width() {
        let r = Rect::new(10.0, 0.0, 0.001, 2.0).clamped_within(&space(), 0.5);
        assert_eq!(r.w, 0.5);
    }

    #[test]
    fn clamp_handles_non_finite_input() {
        let r = Rect::new(f64::NAN, f64::INFINITY, f64::NAN, -1.0).clamped_within(&space(), 1.0);
        assert_eq!(r, space());
    }

    #[test]
    fn clamp_shrinks_oversized_rect() {
        let r = Rect::new(0.0, 0.0, 500.0, 50.0).clamped_within(&space(), 1.0);
        assert_eq!(r, space());
    }
}
