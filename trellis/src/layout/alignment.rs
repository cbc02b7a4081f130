//! Alignment and orientation enums.

use serde::{Deserialize, Serialize};

use crate::primitives::{Point, Size, Spacing};

/// How a widget is placed horizontally inside the slot its parent gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    Stretch,
}

/// How a widget is placed vertically inside the slot its parent gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
    Stretch,
}

/// Placement of a stack's run of children along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StackAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl StackAlignment {
    /// Leading offset of a run of `used` length inside `total`.
    #[inline]
    pub fn offset(self, total: f32, used: f32) -> f32 {
        match self {
            StackAlignment::Start => 0.0,
            StackAlignment::Center => (total - used) / 2.0,
            StackAlignment::End => total - used,
        }
    }
}

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Axis-agnostic accessors so stack math is written once.
impl Orientation {
    #[inline]
    pub fn main(self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    #[inline]
    pub fn cross(self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    /// Build a size from main and cross extents.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    /// Build a point from main and cross coordinates.
    #[inline]
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }

    /// (leading, total) spacing along the main axis.
    #[inline]
    pub fn main_spacing(self, spacing: &Spacing) -> (f32, f32) {
        match self {
            Orientation::Horizontal => (spacing.left, spacing.horizontal()),
            Orientation::Vertical => (spacing.top, spacing.vertical()),
        }
    }

    /// (leading, total) spacing along the cross axis.
    #[inline]
    pub fn cross_spacing(self, spacing: &Spacing) -> (f32, f32) {
        match self {
            Orientation::Horizontal => (spacing.top, spacing.vertical()),
            Orientation::Vertical => (spacing.left, spacing.horizontal()),
        }
    }
}
