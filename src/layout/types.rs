#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the interiors overlap; rectangles that only touch do not.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when `inner` lies inside `self` with at least `inset` to spare on
    /// every side.
    pub fn contains_inset(&self, inner: &Rect, inset: f32) -> bool {
        inner.x >= self.x + inset
            && inner.y >= self.y + inset
            && inner.right() <= self.right() - inset
            && inner.bottom() <= self.bottom() - inset
    }
}

/// Geometry of every component, indexed like the validated graph.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub boxes: Vec<Rect>,
    pub width: f32,
    pub height: f32,
}
