//! Rectangle type used for rendered bounding boxes.
//!
//! All coordinates are document-relative pixels.

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical midpoint.
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(10.0, 20.0, 300.0, 150.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 170.0);
        assert_eq!(r.right(), 310.0);
        assert_eq!(r.mid_y(), 95.0);
    }
}
