//! Board geometry: points, axis-aligned rectangles, hit-testing.
//!
//! Coordinates are board-space `f32` pixels.  The engine only needs two
//! predicates: "does this rect contain this point" (picking an item up) and
//! "do these rects overlap" (resolving a drop against an agent's bounds —
//! overlap rather than point containment, which is far more forgiving for
//! touch input).

/// A point in board space.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: top-left corner plus extent.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// `true` if `p` lies inside (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// `true` if the two rectangles overlap (edge contact counts).
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }

    /// Geometric center.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// A rect of the same extent centered on `p` — the dragged-item footprint
    /// at a pointer position.
    #[inline]
    pub fn centered_at(&self, p: Point) -> Rect {
        Rect::new(p.x - self.w / 2.0, p.y - self.h / 2.0, self.w, self.h)
    }

    /// Move the top-left corner to `p`, keeping the extent.
    #[inline]
    pub fn moved_to(&self, p: Point) -> Rect {
        Rect::new(p.x, p.y, self.w, self.h)
    }
}
