/// A point in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
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

/// Bounding box with top-left origin coordinate system.
///
/// Coordinates follow the extraction convention:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}

impl BBox {
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Current transformation matrix `[a b c d e f]`.
///
/// Only the parts needed to place an image are modelled here; composing
/// matrices is the upstream interpreter's job.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ctm {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Ctm {
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Horizontal translation.
    pub fn translate_x(&self) -> f32 {
        self.e
    }

    /// Vertical translation.
    pub fn translate_y(&self) -> f32 {
        self.f
    }

    /// X scaling factor.
    ///
    /// Uses the length of the first row when the matrix is sheared or
    /// rotated, otherwise the raw `a` entry (which keeps its sign).
    pub fn scaling_factor_x(&self) -> f32 {
        if self.b != 0.0 {
            (self.a * self.a + self.b * self.b).sqrt()
        } else {
            self.a
        }
    }

    /// Y scaling factor, same convention as [`scaling_factor_x`](Self::scaling_factor_x).
    pub fn scaling_factor_y(&self) -> f32 {
        if self.c != 0.0 {
            (self.c * self.c + self.d * self.d).sqrt()
        } else {
            self.d
        }
    }
}

impl Default for Ctm {
    fn default() -> Self {
        Self::identity()
    }
}
