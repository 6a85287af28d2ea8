//! Axis-aligned rectangles, sizes, and colors shared by every stage.
//!
//! Coordinates are y-up: `y0` is the bottom edge and `y1` the top edge.
//! The same [`Rect`] type carries both content-space boxes (pixels) and
//! UV-space boxes, which may be any sub-rectangle of an atlas.

/// Intrinsic content dimensions in pixels.
///
/// A size with zero (or non-positive) width or height means "no content":
/// the scale-fit resolver falls back to drawing the full bound.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// The "no content" size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True unless both dimensions are strictly positive.
    ///
    /// NaN dimensions count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned box `{x0, y0, x1, y1}` (left, bottom, right, top).
///
/// `x1 >= x0` and `y1 >= y0` are expected. Zero-area rects are legal
/// everywhere and never produce NaN downstream.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// The full `[0, 1]²` UV square.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a rect from its four edges.
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rect from its bottom-left corner and a size.
    pub fn from_origin_size(x: f32, y: f32, size: Size) -> Self {
        Self::new(x, y, x + size.width, y + size.height)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Width and height as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> [f32; 2] {
        [(self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5]
    }

    /// True unless both width and height are strictly positive.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Whether `other` lies inside `self` (edges inclusive).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Shrink by `d` on all four sides. See [`inset_xy`](Self::inset_xy).
    pub fn inset(self, d: f32) -> Self {
        self.inset_xy(d, d)
    }

    /// Shrink by `dx` on the left and right and `dy` on the bottom and top.
    ///
    /// Each inset is clamped to half the extent on its axis, so an oversized
    /// inset collapses the rect onto its center line instead of inverting it.
    /// Negative insets are treated as zero.
    pub fn inset_xy(self, dx: f32, dy: f32) -> Self {
        let dx = dx.max(0.0).min(self.width().max(0.0) * 0.5);
        let dy = dy.max(0.0).min(self.height().max(0.0) * 0.5);
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 - dx, self.y1 - dy)
    }

    /// Split at the vertical line `x = at` into `(left, right)`.
    ///
    /// `at` is clamped into `[x0, x1]`, so either half may be zero-width.
    pub fn split_x(self, at: f32) -> (Self, Self) {
        let at = at.max(self.x0).min(self.x1);
        (
            Self::new(self.x0, self.y0, at, self.y1),
            Self::new(at, self.y0, self.x1, self.y1),
        )
    }

    /// Split at the horizontal line `y = at` into `(bottom, top)`.
    ///
    /// `at` is clamped into `[y0, y1]`.
    pub fn split_y(self, at: f32) -> (Self, Self) {
        let at = at.max(self.y0).min(self.y1);
        (
            Self::new(self.x0, self.y0, self.x1, at),
            Self::new(self.x0, at, self.x1, self.y1),
        )
    }

    /// Map a content-space border onto this rect.
    ///
    /// `edges` are pixels of transparent border around content of size
    /// `content`; each side is removed proportionally. Borders that overlap
    /// collapse the affected axis rather than inverting it. Empty content
    /// leaves the rect unchanged.
    pub fn trim(self, content: Size, edges: Edges) -> Self {
        if content.is_empty() {
            return self;
        }
        let fx0 = (edges.left / content.width).max(0.0).min(1.0);
        let fy0 = (edges.bottom / content.height).max(0.0).min(1.0);
        let fx1 = ((content.width - edges.right) / content.width).min(1.0).max(fx0);
        let fy1 = ((content.height - edges.top) / content.height).min(1.0).max(fy0);
        let (w, h) = (self.width(), self.height());
        Self::new(
            self.x0 + w * fx0,
            self.y0 + h * fy0,
            self.x0 + w * fx1,
            self.y0 + h * fy1,
        )
    }
}

/// Per-side distances in pixels (left, bottom, right, top).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edges {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Edges {
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Same distance on every side.
    pub const fn uniform(d: f32) -> Self {
        Self::new(d, d, d, d)
    }
}

/// Normalized anchor within a rect. `(0, 0)` = bottom-left, `(1, 1)` = top-right.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pivot {
    pub x: f32,
    pub y: f32,
}

impl Pivot {
    pub const CENTER: Self = Self::new(0.5, 0.5);
    pub const BOTTOM_LEFT: Self = Self::new(0.0, 0.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Pivot {
    fn default() -> Self {
        Self::CENTER
    }
}

/// 8-bit-per-channel vertex color (tint), straight alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque white: the identity tint.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}
