//! Layout strategy contract and shared helpers.
//!
//! A container with an attached [`Layout`] delegates both passes to it:
//! `measure_desired_size` reports the size its children need, and
//! `arrange_children` commits each child's bounds through
//! [`WidgetTree::arrange`]. Strategies are stateless configuration and are
//! shared as `Rc<dyn Layout>`.

use std::any::Any;
use std::fmt;

use super::alignment::{HorizontalAlignment, VerticalAlignment};
use crate::primitives::{Rect, Size, Spacing};
use crate::tree::{WidgetId, WidgetTree};

// =========================================================================
// Layout trait
// =========================================================================

/// A child-positioning strategy.
///
/// Implementations must be deterministic: the same children and available
/// size always yield the same desired size. `arrange_children` must cope
/// with a rect smaller than the measured size by clamping, never failing.
///
/// Stale ids and `Collapsed` children in `children` are skipped.
pub trait Layout: fmt::Debug {
    /// Size the children need, including this layout's own margin/padding.
    fn measure_desired_size(&self, tree: &WidgetTree, children: &[WidgetId], available: Size) -> Size;

    /// Place every child inside `final_rect` (the owner's content rect).
    fn arrange_children(&self, tree: &mut WidgetTree, children: &[WidgetId], final_rect: Rect);

    /// Spacing and insets carried by the strategy itself.
    fn base(&self) -> &LayoutBase;

    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

// =========================================================================
// LayoutBase
// =========================================================================

/// State every strategy carries: inter-child spacing plus the layout's own
/// margin and padding, distinct from the owning widget's.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutBase {
    pub spacing: f32,
    pub margin: Spacing,
    pub padding: Spacing,
}

impl LayoutBase {
    /// Total inset applied by this layout on every side.
    #[inline]
    pub fn insets(&self) -> Spacing {
        self.margin + self.padding
    }

    /// `container` inset by margin + padding, never negative.
    #[inline]
    pub fn content_rect(&self, container: Rect) -> Rect {
        container.inset(&self.insets())
    }

    /// `container` shrunk by margin + padding, never negative.
    #[inline]
    pub fn available_size(&self, container: Size) -> Size {
        container.deflate(&self.insets())
    }

    /// Add this layout's insets back onto a measured children size.
    #[inline]
    pub(crate) fn outer_size(&self, inner: Size) -> Size {
        inner.inflate(&self.insets())
    }
}

// =========================================================================
// Helpers
// =========================================================================

/// Componentwise clamp of `desired` into `[min, max]`.
#[inline]
pub fn apply_constraints(desired: Size, min: Size, max: Size) -> Size {
    desired.clamp(min, max)
}

/// Position `desired` inside `bounds`.
///
/// Stretched axes take the full extent of `bounds`; the others keep the
/// desired extent and are offset per alignment.
pub fn apply_alignment(
    bounds: Rect,
    desired: Size,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
) -> Rect {
    let (x, width) = match horizontal {
        HorizontalAlignment::Left => (bounds.left(), desired.width),
        HorizontalAlignment::Center => (bounds.left() + (bounds.width - desired.width) / 2.0, desired.width),
        HorizontalAlignment::Right => (bounds.right() - desired.width, desired.width),
        HorizontalAlignment::Stretch => (bounds.left(), bounds.width),
    };

    let (y, height) = match vertical {
        VerticalAlignment::Top => (bounds.top(), desired.height),
        VerticalAlignment::Center => (bounds.top() + (bounds.height - desired.height) / 2.0, desired.height),
        VerticalAlignment::Bottom => (bounds.bottom() - desired.height, desired.height),
        VerticalAlignment::Stretch => (bounds.top(), bounds.height),
    };

    Rect::new(x, y, width, height)
}
