//! Plain container.

use super::impl_widget_any;
use crate::primitives::{Point, Size};
use crate::widget::Widget;

/// A container with no content of its own. Give it a layout, or position
/// its children manually.
///
/// A scrollable panel shifts its children by a scroll offset when painting
/// and hit-testing. The offset is set through the tree
/// ([`WidgetTree::scroll_to`](crate::tree::WidgetTree::scroll_to) and
/// friends), which clamps it to `content size - panel size`.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    clip_children: bool,
    scrollable: bool,
    scroll_offset: Point,
    content_size: Option<Size>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip children to the padded content area while painting.
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip_children = clip;
        self
    }

    /// Make the panel scroll its children. Scrolling panels also clip.
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.set_scrollable(scrollable);
        self
    }

    /// Scrollable extent, instead of the children's arranged extent.
    pub fn with_content_size(mut self, size: Size) -> Self {
        self.content_size = Some(size.sanitized());
        self
    }

    pub fn clip_children(&self) -> bool {
        self.clip_children
    }

    pub fn set_clip_children(&mut self, clip: bool) {
        self.clip_children = clip;
    }

    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    /// Turning scrolling off resets the offset.
    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
        if scrollable {
            self.clip_children = true;
        } else {
            self.scroll_offset = Point::ORIGIN;
        }
    }

    pub fn content_size(&self) -> Option<Size> {
        self.content_size
    }

    pub fn set_content_size(&mut self, size: Option<Size>) {
        self.content_size = size.map(Size::sanitized);
    }

    /// Store an offset already clamped by the caller.
    pub(crate) fn set_scroll_offset(&mut self, offset: Point) {
        self.scroll_offset = offset;
    }
}

/// Clamp `offset` into `[0, content - client]` on each axis.
pub(crate) fn clamp_scroll_offset(offset: Point, content: Size, client: Size) -> Point {
    let max_x = (content.width - client.width).max(0.0);
    let max_y = (content.height - client.height).max(0.0);
    Point::new(offset.x.max(0.0).min(max_x), offset.y.max(0.0).min(max_y))
}

impl Widget for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }

    impl_widget_any!();

    fn clips_children(&self) -> bool {
        self.clip_children
    }

    fn scroll_offset(&self) -> Point {
        if self.scrollable { self.scroll_offset } else { Point::ORIGIN }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll_offset() {
        let content = Size::new(300.0, 500.0);
        let client = Size::new(100.0, 200.0);
        assert_eq!(clamp_scroll_offset(Point::new(50.0, 50.0), content, client), Point::new(50.0, 50.0));
        assert_eq!(clamp_scroll_offset(Point::new(999.0, 999.0), content, client), Point::new(200.0, 300.0));
        assert_eq!(clamp_scroll_offset(Point::new(-5.0, -5.0), content, client), Point::ORIGIN);
        // Content smaller than the panel: nothing to scroll.
        assert_eq!(clamp_scroll_offset(Point::new(10.0, 10.0), Size::new(50.0, 50.0), client), Point::ORIGIN);
    }

    #[test]
    fn test_offset_only_applies_when_scrollable() {
        let mut panel = Panel::new().scrollable(true);
        assert!(panel.clip_children());
        panel.set_scroll_offset(Point::new(0.0, 30.0));
        assert_eq!(Widget::scroll_offset(&panel), Point::new(0.0, 30.0));

        panel.set_scrollable(false);
        assert_eq!(Widget::scroll_offset(&panel), Point::ORIGIN);
        panel.set_scrollable(true);
        assert_eq!(Widget::scroll_offset(&panel), Point::ORIGIN);
    }
}
