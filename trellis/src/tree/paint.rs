//! Render pass.
//!
//! Runs after arrange. Each visible widget is painted in its own local
//! space: chrome first (background, then border), then the kind's content,
//! then children in z-order, shifted by the widget's scroll offset. Hidden and collapsed widgets and their
//! subtrees are skipped.

use super::{WidgetId, WidgetNode, WidgetTree};
use crate::primitives::{Point, Rect};
use crate::render::Renderer;
use crate::widget::Chrome;

impl WidgetTree {
    /// Paint the subtree rooted at `id` and clear paint-dirty state.
    pub fn render(&mut self, id: WidgetId, renderer: &mut dyn Renderer) {
        self.render_node(id, renderer);
        for node in self.arena.values_mut() {
            node.paint_dirty = false;
        }
        self.repaint = false;
    }

    fn render_node(&self, id: WidgetId, renderer: &mut dyn Renderer) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if !node.is_visible() {
            return;
        }

        let bounds = node.bounds;
        renderer.push_transform();
        renderer.translate(bounds.x, bounds.y);

        let local = Rect::new(0.0, 0.0, bounds.width, bounds.height);
        render_chrome(renderer, local, &node.chrome);
        node.kind.render(&node.state(), renderer);

        self.render_children(node, renderer);

        renderer.pop_transform();
    }

    fn render_children(&self, node: &WidgetNode, renderer: &mut dyn Renderer) {
        if node.children.is_empty() {
            return;
        }
        let clip = node.kind.clips_children();
        if clip {
            renderer.push_clip_rect(node.state().content_rect());
        }
        let scroll = node.kind.scroll_offset();
        let scrolled = scroll != Point::ORIGIN;
        if scrolled {
            renderer.push_transform();
            renderer.translate(-scroll.x, -scroll.y);
        }
        for &child in &node.children {
            self.render_node(child, renderer);
        }
        if scrolled {
            renderer.pop_transform();
        }
        if clip {
            renderer.pop_clip_rect();
        }
    }
}

/// Background then border, rounded when the chrome has a corner radius.
fn render_chrome(renderer: &mut dyn Renderer, bounds: Rect, chrome: &Chrome) {
    if let Some(background) = chrome.background.filter(|c| c.is_visible()) {
        if chrome.corner_radius > 0.0 {
            renderer.fill_rounded_rectangle(bounds, chrome.corner_radius, background);
        } else {
            renderer.fill_rectangle(bounds, background);
        }
    }

    if chrome.border_width > 0.0
        && let Some(border) = chrome.border_color.filter(|c| c.is_visible())
    {
        if chrome.corner_radius > 0.0 {
            renderer.draw_rounded_rectangle(bounds, chrome.corner_radius, border, chrome.border_width);
        } else {
            renderer.draw_rectangle(bounds, border, chrome.border_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitives::{Color, Rect};
    use crate::render::{DisplayList, DrawCommand};
    use crate::tree::WidgetTree;
    use crate::widget::Visibility;
    use crate::widgets::{Label, Panel};

    #[test]
    fn test_chrome_and_children_in_absolute_space() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_background(root, Color::WHITE);
        let child = tree.create(Panel::new());
        tree.set_border(child, Color::BLACK, 1.0);
        tree.add_child(root, child).unwrap();

        tree.arrange(root, Rect::new(10.0, 10.0, 100.0, 100.0));
        tree.arrange(child, Rect::new(5.0, 5.0, 20.0, 20.0));

        let mut list = DisplayList::new();
        tree.render(root, &mut list);

        assert!(list.is_balanced());
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::FillRect { rect: Rect::new(10.0, 10.0, 100.0, 100.0), radius: 0.0, color: Color::WHITE },
                DrawCommand::StrokeRect {
                    rect: Rect::new(15.0, 15.0, 20.0, 20.0),
                    radius: 0.0,
                    color: Color::BLACK,
                    width: 1.0
                },
            ]
        );
        assert!(!tree.needs_repaint());
    }

    #[test]
    fn test_rounded_chrome() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_background(root, Color::WHITE);
        tree.set_corner_radius(root, 4.0);
        tree.arrange(root, Rect::new(0.0, 0.0, 10.0, 10.0));

        let mut list = DisplayList::new();
        tree.render(root, &mut list);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { radius, .. } if radius == 4.0));
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        let label = tree.create(Label::new("secret"));
        tree.add_child(root, label).unwrap();
        tree.arrange(root, Rect::new(0.0, 0.0, 100.0, 100.0));

        let mut list = DisplayList::new();
        tree.render(root, &mut list);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["secret"]);

        tree.set_visibility(label, Visibility::Hidden);
        let mut list = DisplayList::new();
        tree.render(root, &mut list);
        assert_eq!(list.texts().count(), 0);
    }

    #[test]
    fn test_clipping_panel_pushes_clip() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new().with_clip(true));
        let label = tree.create(Label::new("x"));
        tree.add_child(root, label).unwrap();
        tree.arrange(root, Rect::new(0.0, 0.0, 50.0, 50.0));

        let mut list = DisplayList::new();
        tree.render(root, &mut list);
        assert_eq!(list.commands().first(), Some(&DrawCommand::PushClip(Rect::new(0.0, 0.0, 50.0, 50.0))));
        assert_eq!(list.commands().last(), Some(&DrawCommand::PopClip));
        assert!(list.is_balanced());
    }
}
