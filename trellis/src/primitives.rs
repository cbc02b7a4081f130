//! Core primitive types for Trellis.
//!
//! Geometry values used by every layer of the toolkit. Equality on all of
//! them is tolerance-based (`EPSILON`), so that layouts computed twice
//! through different float paths still compare equal.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Tolerance used by every geometric comparison.
pub const EPSILON: f32 = 1e-3;

/// Compare two floats within `EPSILON`.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() < EPSILON
}

/// Replace NaN and negative values with zero. Infinity is kept (unbounded).
#[inline]
pub(crate) fn non_negative(value: f32) -> f32 {
    if value.is_nan() || value < 0.0 { 0.0 } else { value }
}

// =========================================================================
// Point
// =========================================================================

/// A point in 2D space.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

// =========================================================================
// Size
// =========================================================================

/// A 2D size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Effectively unbounded upper limit, used as the default max size.
    pub const MAX: Self = Self {
        width: 10_000.0,
        height: 10_000.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A size is empty when either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Componentwise clamp into `[min, max]`. `min` wins when the range is inverted.
    #[inline]
    pub fn clamp(self, min: Size, max: Size) -> Size {
        Size {
            width: self.width.min(max.width).max(min.width),
            height: self.height.min(max.height).max(min.height),
        }
    }

    /// Grow by the total of a spacing on each axis.
    #[inline]
    pub fn inflate(self, spacing: &Spacing) -> Size {
        Size {
            width: self.width + spacing.horizontal(),
            height: self.height + spacing.vertical(),
        }
    }

    /// Shrink by the total of a spacing on each axis, never below zero.
    #[inline]
    pub fn deflate(self, spacing: &Spacing) -> Size {
        Size {
            width: (self.width - spacing.horizontal()).max(0.0),
            height: (self.height - spacing.vertical()).max(0.0),
        }
    }

    /// Zero out negative or NaN dimensions.
    #[inline]
    pub fn sanitized(self) -> Size {
        Size {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.width, other.width) && approx_eq(self.height, other.height)
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

// =========================================================================
// Rect
// =========================================================================

/// A rectangle, positioned in its parent's coordinate space.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Check if a point is inside this rectangle. Edges are inclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        self.origin()
    }

    #[inline]
    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Compute the smallest rectangle that contains both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    /// Check if this rectangle overlaps another. Touching edges count.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// Get the intersection of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        })
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Shrink by a spacing on every side. Width and height never go negative.
    #[inline]
    pub fn inset(&self, spacing: &Spacing) -> Self {
        Self {
            x: self.x + spacing.left,
            y: self.y + spacing.top,
            width: (self.width - spacing.horizontal()).max(0.0),
            height: (self.height - spacing.vertical()).max(0.0),
        }
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.width, other.width)
            && approx_eq(self.height, other.height)
    }
}

// =========================================================================
// Spacing
// =========================================================================

/// Margin or padding around a box.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spacing {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Spacing {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Explicit values, in left, top, right, bottom order.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Uniform spacing on all sides.
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Symmetric spacing (horizontal, vertical).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// Total horizontal spacing.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical spacing.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl PartialEq for Spacing {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.left, other.left)
            && approx_eq(self.top, other.top)
            && approx_eq(self.right, other.right)
            && approx_eq(self.bottom, other.bottom)
    }
}

impl Add for Spacing {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

// =========================================================================
// Color
// =========================================================================

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TEXT: Self = Self::rgb(0.1, 0.1, 0.1);
    pub const CONTROL: Self = Self::rgb(0.88, 0.88, 0.88);
    pub const CONTROL_HOVER: Self = Self::rgb(0.82, 0.86, 0.95);
    pub const CONTROL_PRESSED: Self = Self::rgb(0.7, 0.76, 0.9);
    pub const CONTROL_DISABLED: Self = Self::rgb(0.94, 0.94, 0.94);
    pub const BORDER: Self = Self::rgb(0.6, 0.6, 0.6);

    /// Create a color from RGB values (0.0-1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values (0.0-1.0).
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB values (0-255).
    #[inline]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Whether painting with this color has any visible effect.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }
}
