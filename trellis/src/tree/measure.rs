//! Measure/arrange protocol.
//!
//! `measure` is pure: it reads the tree and returns a desired size without
//! touching bounds. `arrange` commits bounds and recurses through the
//! attached layout. Neither ever fails; degenerate input is clamped.

use tracing::{trace, warn};

use super::{WidgetId, WidgetNode, WidgetTree};
use crate::primitives::{Rect, Size, non_negative};
use crate::widget::Visibility;

impl WidgetTree {
    /// A child that takes part in layout: present in the arena and not collapsed.
    pub fn layout_child(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.arena
            .get(id)
            .filter(|n| n.visibility != Visibility::Collapsed)
    }

    /// Desired size of a widget given the space its parent offers.
    ///
    /// With a layout: the layout's size plus padding. A container without a
    /// layout: the bounding box of its children at their manual positions,
    /// plus padding. A leaf: its kind's content size plus padding, or its
    /// min size if the kind reports none. Always clamped to `[min, max]`.
    pub fn measure(&self, id: WidgetId, available: Size) -> Size {
        let Some(node) = self.arena.get(id) else {
            return Size::ZERO;
        };

        let available = sanitize_available(available);
        let inner = available.deflate(&node.padding);

        let desired = if let Some(layout) = &node.layout {
            layout
                .measure_desired_size(self, &node.children, inner)
                .inflate(&node.padding)
        } else if node.children.iter().any(|&c| self.arena.contains_key(c)) {
            self.measure_manual(node, inner).inflate(&node.padding)
        } else {
            match node.kind.measure_content(inner, self.text_measure.as_ref()) {
                Some(content) => content.inflate(&node.padding),
                None => return node.min_size,
            }
        };

        desired.sanitized().clamp(node.min_size, node.max_size)
    }

    /// Bounding box of children at position + margin + desired size.
    fn measure_manual(&self, node: &WidgetNode, inner: Size) -> Size {
        let mut extent = Size::ZERO;
        for &child in &node.children {
            let Some(child_node) = self.layout_child(child) else {
                continue;
            };
            let desired = self.measure(child, inner);
            let pos = child_node.position;
            let margin = child_node.margin;
            extent.width = extent.width.max(pos.x + margin.horizontal() + desired.width);
            extent.height = extent.height.max(pos.y + margin.vertical() + desired.height);
        }
        extent
    }

    /// Commit `final_rect` (parent space) as the widget's bounds and lay out
    /// its children inside the padded content rect.
    pub fn arrange(&mut self, id: WidgetId, final_rect: Rect) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };

        let final_rect = sanitize_rect(final_rect);
        node.bounds = final_rect;
        node.layout_dirty = false;

        let content = Rect::new(0.0, 0.0, final_rect.width, final_rect.height).inset(&node.padding);
        trace!(kind = node.kind.type_name(), ?final_rect, "arrange");

        self.arrange_children(id, content);
        self.reclamp_scroll(id);
        self.invalidate(id);
    }

    /// Re-run only the children pass inside `content` (local space),
    /// leaving the widget's own bounds untouched.
    pub fn arrange_children(&mut self, id: WidgetId, content: Rect) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if node.children.is_empty() {
            return;
        }
        let children = node.children.clone();

        match node.layout.clone() {
            Some(layout) => layout.arrange_children(self, &children, content),
            None => self.arrange_manual(&children, content),
        }
    }

    /// Place each child at content origin + position + margin, at its desired size.
    fn arrange_manual(&mut self, children: &[WidgetId], content: Rect) {
        for &child in children {
            let Some(node) = self.layout_child(child) else {
                continue;
            };
            let (pos, margin) = (node.position, node.margin);
            let desired = self.measure(child, content.size());
            let rect = Rect::new(
                content.x + pos.x + margin.left,
                content.y + pos.y + margin.top,
                desired.width,
                desired.height,
            );
            self.arrange(child, rect);
        }
    }
}

fn sanitize_available(available: Size) -> Size {
    let sanitized = available.sanitized();
    if sanitized != available {
        warn!(?available, "negative or NaN available size clamped to zero");
    }
    sanitized
}

fn sanitize_rect(rect: Rect) -> Rect {
    let width = finite_extent(rect.width);
    let height = finite_extent(rect.height);
    if width != rect.width || height != rect.height {
        warn!(?rect, "degenerate arrange rect clamped");
    }
    Rect::new(
        if rect.x.is_finite() { rect.x } else { 0.0 },
        if rect.y.is_finite() { rect.y } else { 0.0 },
        width,
        height,
    )
}

#[inline]
fn finite_extent(value: f32) -> f32 {
    if value.is_finite() { non_negative(value) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use crate::layout::StackLayout;
    use crate::primitives::{Point, Rect, Size, Spacing};
    use crate::tree::WidgetTree;
    use crate::widget::Visibility;
    use crate::widgets::{Label, Panel};

    #[test]
    fn test_leaf_without_content_measures_min_size() {
        let mut tree = WidgetTree::new();
        let panel = tree.create(Panel::new());
        tree.set_min_size(panel, Size::new(30.0, 20.0));
        assert_eq!(tree.measure(panel, Size::new(500.0, 500.0)), Size::new(30.0, 20.0));
    }

    #[test]
    fn test_leaf_content_adds_padding_and_clamps() {
        let mut tree = WidgetTree::new();
        // Default font 12px: "abcd" = 4 * 7.2 wide, 14.4 tall.
        let label = tree.create(Label::new("abcd"));
        tree.set_padding(label, Spacing::all(5.0));
        assert_eq!(tree.measure(label, Size::new(500.0, 500.0)), Size::new(38.8, 24.4));

        tree.set_max_size(label, Size::new(20.0, 100.0));
        assert_eq!(tree.measure(label, Size::new(500.0, 500.0)), Size::new(20.0, 24.4));
    }

    #[test]
    fn test_measure_is_idempotent_and_pure() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_layout(root, StackLayout::vertical().with_spacing(3.0));
        for text in ["one", "two", "three"] {
            let label = tree.create(Label::new(text));
            tree.add_child(root, label).unwrap();
        }

        let first = tree.measure(root, Size::new(200.0, 200.0));
        let second = tree.measure(root, Size::new(200.0, 200.0));
        assert_eq!(first, second);
        assert_eq!(tree.bounds(root), Some(Rect::ZERO));
    }

    #[test]
    fn test_negative_available_is_treated_as_zero() {
        let mut tree = WidgetTree::new();
        let panel = tree.create(Panel::new());
        tree.set_min_size(panel, Size::new(10.0, 10.0));
        let root = tree.create(Panel::new());
        tree.set_layout(root, StackLayout::vertical());
        tree.add_child(root, panel).unwrap();

        let size = tree.measure(root, Size::new(-50.0, f32::NAN));
        assert_eq!(size, Size::new(10.0, 10.0));
    }

    #[test]
    fn test_manual_placement_bounding_box() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_padding(root, Spacing::all(4.0));

        let a = tree.create(Panel::new());
        tree.set_fixed_size(a, Size::new(20.0, 10.0));
        tree.set_position(a, Point::new(10.0, 5.0));
        tree.set_margin(a, Spacing::new(2.0, 0.0, 3.0, 0.0));
        tree.add_child(root, a).unwrap();

        let b = tree.create(Panel::new());
        tree.set_fixed_size(b, Size::new(5.0, 40.0));
        tree.add_child(root, b).unwrap();

        // width: 10 + 5 (margin) + 20 = 35; height: 40; plus padding 8.
        assert_eq!(tree.measure(root, Size::new(500.0, 500.0)), Size::new(43.0, 48.0));

        tree.arrange(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tree.bounds(a), Some(Rect::new(16.0, 9.0, 20.0, 10.0)));
        assert_eq!(tree.bounds(b), Some(Rect::new(4.0, 4.0, 5.0, 40.0)));
    }

    #[test]
    fn test_collapsed_child_is_skipped() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_layout(root, StackLayout::vertical());
        let a = tree.create(Panel::new());
        tree.set_fixed_size(a, Size::new(10.0, 10.0));
        let b = tree.create(Panel::new());
        tree.set_fixed_size(b, Size::new(10.0, 10.0));
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        assert_eq!(tree.measure(root, Size::new(100.0, 100.0)).height, 20.0);
        tree.set_visibility(a, Visibility::Collapsed);
        assert_eq!(tree.measure(root, Size::new(100.0, 100.0)).height, 10.0);

        // Hidden keeps its space.
        tree.set_visibility(a, Visibility::Hidden);
        assert_eq!(tree.measure(root, Size::new(100.0, 100.0)).height, 20.0);
    }

    #[test]
    fn test_arrange_clamps_degenerate_rect() {
        let mut tree = WidgetTree::new();
        let panel = tree.create(Panel::new());
        tree.arrange(panel, Rect::new(0.0, 0.0, -10.0, f32::INFINITY));
        assert_eq!(tree.bounds(panel), Some(Rect::ZERO));
    }
}
