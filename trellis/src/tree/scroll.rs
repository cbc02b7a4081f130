//! Scrolling panels.
//!
//! A scrollable [`Panel`] keeps an offset that shifts its children. The
//! offset is clamped to `content size - panel size`, where the content size
//! is the panel's explicit one or the extent of its arranged children.

use tracing::{trace, warn};

use super::{WidgetId, WidgetTree};
use crate::primitives::{Point, Size};
use crate::widgets::{Panel, clamp_scroll_offset};

/// Pixels scrolled per wheel notch.
pub(crate) const WHEEL_LINE_HEIGHT: f32 = 20.0;

impl WidgetTree {
    pub fn is_scrollable(&self, id: WidgetId) -> bool {
        self.widget::<Panel>(id).is_some_and(Panel::is_scrollable)
    }

    /// Current offset of a scrollable panel. Origin for anything else.
    pub fn scroll_offset(&self, id: WidgetId) -> Point {
        self.arena
            .get(id)
            .map(|n| n.kind.scroll_offset())
            .unwrap_or(Point::ORIGIN)
    }

    /// Size of the scrollable content in the panel's local space.
    ///
    /// The panel's explicit content size if it has one, otherwise the
    /// bottom-right extent of its laid-out children (with their margins)
    /// plus its own right/bottom padding.
    pub fn scroll_extent(&self, id: WidgetId) -> Size {
        let Some(node) = self.arena.get(id) else {
            return Size::ZERO;
        };
        if let Some(size) = self.widget::<Panel>(id).and_then(Panel::content_size) {
            return size;
        }

        let mut extent = Size::ZERO;
        for &child in &node.children {
            let Some(child_node) = self.layout_child(child) else {
                continue;
            };
            let b = child_node.bounds;
            extent.width = extent.width.max(b.right() + child_node.margin.right);
            extent.height = extent.height.max(b.bottom() + child_node.margin.bottom);
        }
        Size::new(
            extent.width + node.padding.right,
            extent.height + node.padding.bottom,
        )
    }

    /// Largest offset the panel can scroll to on each axis.
    pub fn max_scroll_offset(&self, id: WidgetId) -> Point {
        let client = self.bounds(id).map(|b| b.size()).unwrap_or(Size::ZERO);
        clamp_scroll_offset(Point::new(f32::INFINITY, f32::INFINITY), self.scroll_extent(id), client)
    }

    /// Scroll a panel to `offset`, clamped to its scrollable range.
    ///
    /// Returns whether the offset changed. Widgets that are not scrollable
    /// panels are left alone.
    pub fn set_scroll_offset(&mut self, id: WidgetId, offset: Point) -> bool {
        if !self.is_scrollable(id) {
            warn!(?id, "scroll ignored: not a scrollable panel");
            return false;
        }
        let client = self.bounds(id).map(|b| b.size()).unwrap_or(Size::ZERO);
        let clamped = clamp_scroll_offset(offset, self.scroll_extent(id), client);
        if clamped == self.scroll_offset(id) {
            return false;
        }
        if let Some(panel) = self.widget_mut::<Panel>(id) {
            panel.set_scroll_offset(clamped);
        }
        trace!(?id, offset = ?clamped, "scrolled");
        self.invalidate(id);
        true
    }

    pub fn scroll_to(&mut self, id: WidgetId, position: Point) -> bool {
        self.set_scroll_offset(id, position)
    }

    pub fn scroll_by(&mut self, id: WidgetId, delta: Point) -> bool {
        let current = self.scroll_offset(id);
        self.set_scroll_offset(id, current + delta)
    }

    /// Pull the offset back into range after the panel or its content was
    /// re-arranged.
    pub(crate) fn reclamp_scroll(&mut self, id: WidgetId) {
        if !self.is_scrollable(id) {
            return;
        }
        let client = self.bounds(id).map(|b| b.size()).unwrap_or(Size::ZERO);
        let current = self.scroll_offset(id);
        let clamped = clamp_scroll_offset(current, self.scroll_extent(id), client);
        if clamped != current
            && let Some(panel) = self.widget_mut::<Panel>(id)
        {
            panel.set_scroll_offset(clamped);
        }
    }
}
