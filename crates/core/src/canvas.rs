/// A physical drawing surface: pixel dimensions plus device pixel ratio.
///
/// Pure description — the actual surface (terminal cells, an HTML canvas, a
/// GPU swapchain) lives in the frontend. A pane without a canvas is in its
/// absence state and skips all view construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    physical_width: u32,
    physical_height: u32,
    dpr: f64,
}

impl Canvas {
    pub fn new(physical_width: u32, physical_height: u32, dpr: f64) -> Self {
        Self {
            physical_width,
            physical_height,
            dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    pub fn physical_width(&self) -> u32 {
        self.physical_width
    }

    pub fn physical_height(&self) -> u32 {
        self.physical_height
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    pub fn logical_width(&self) -> f64 {
        f64::from(self.physical_width) / self.dpr
    }

    pub fn logical_height(&self) -> f64 {
        f64::from(self.physical_height) / self.dpr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_size_divides_by_dpr() {
        let c = Canvas::new(800, 600, 2.0);
        assert_eq!(c.logical_width(), 400.0);
        assert_eq!(c.logical_height(), 300.0);
    }

    #[test]
    fn bogus_dpr_falls_back_to_one() {
        let c = Canvas::new(100, 100, 0.0);
        assert_eq!(c.dpr(), 1.0);
        assert_eq!(Canvas::new(100, 100, f64::NAN).dpr(), 1.0);
    }
}
