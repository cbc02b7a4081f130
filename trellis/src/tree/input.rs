//! Hit testing, coordinate transforms and event propagation.
//!
//! Every node's bounds live in its parent's space, so descending one level
//! means subtracting the node's bounds origin and adding its scroll offset.
//! Transforms to and from window
//! space walk the parent chain and cost O(depth).

use tracing::trace;

use super::scroll::WHEEL_LINE_HEIGHT;
use super::{WidgetId, WidgetTree};
use crate::event_context::{EventResult, KeyEvent, MouseButton, MouseEvent};
use crate::primitives::Point;

impl WidgetTree {
    /// Bounds containment, `point` in the widget's parent space.
    /// Hidden and collapsed widgets never hit.
    pub fn hit_test(&self, id: WidgetId, point: Point) -> bool {
        self.arena
            .get(id)
            .is_some_and(|n| n.is_visible() && n.bounds.contains(point))
    }

    /// Deepest widget under `point` (in `id`'s parent space), topmost child first.
    pub fn find_widget_at(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        if !self.hit_test(id, point) {
            return None;
        }
        let node = self.arena.get(id)?;
        let local = point - node.bounds.origin() + node.kind.scroll_offset();
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.find_widget_at(child, local))
            .or(Some(id))
    }

    /// Map a point in `id`'s local space to window space.
    pub fn local_to_global(&self, id: WidgetId, point: Point) -> Point {
        let mut point = point;
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.arena.get(cid) else {
                break;
            };
            if cid != id {
                point = point - node.kind.scroll_offset();
            }
            point = point + node.bounds.origin();
            current = node.parent;
        }
        point
    }

    /// Map a window-space point into `id`'s local space.
    pub fn global_to_local(&self, id: WidgetId, point: Point) -> Point {
        point - self.local_to_global(id, Point::ORIGIN)
    }

    /// Deliver a mouse event to `id`, position in its parent space.
    ///
    /// Updates hover, runs `on_mouse_move` for moves inside the widget, lets
    /// the kind intercept, then offers the event to visible children, topmost
    /// first, stopping at the first that handles it. A wheel event nobody
    /// handled scrolls the widget if it is a scrollable panel. Returns whether
    /// anything handled it.
    pub fn mouse_event(&mut self, id: WidgetId, event: &MouseEvent) -> bool {
        let Some(node) = self.arena.get_mut(id) else {
            return false;
        };
        if !node.is_visible() {
            return false;
        }

        let inside = node.bounds.contains(event.position());
        let hover_changed = inside != node.hovered;
        if hover_changed {
            node.hovered = inside;
            node.kind.on_hover_changed(inside);
        }
        let enabled = node.enabled;
        if hover_changed {
            self.invalidate(id);
        }
        if !enabled {
            return false;
        }

        if inside && matches!(event, MouseEvent::CursorMoved { .. }) {
            self.fire_mouse_move(id, event);
        }

        let Some(node) = self.arena.get_mut(id) else {
            return false;
        };
        let state = node.state();
        let result = node.kind.on_mouse_event(&state, event);
        if result.is_handled() {
            let focusable = node.kind.accepts_focus();
            trace!(kind = node.kind.type_name(), ?result, "mouse event handled");
            self.invalidate(id);
            if focusable && matches!(event, MouseEvent::ButtonPressed { button: MouseButton::Left, .. }) {
                self.set_focus(Some(id));
            }
            self.fire_result(id, result);
            return true;
        }

        let scroll = node.kind.scroll_offset();
        let local = event.translated(state.bounds.origin() - scroll);
        let children = node.children.clone();
        if children.iter().rev().any(|&child| self.mouse_event(child, &local)) {
            return true;
        }

        match event {
            MouseEvent::WheelScrolled { delta, .. } if inside && self.is_scrollable(id) => {
                self.scroll_by(id, Point::new(0.0, -*delta * WHEEL_LINE_HEIGHT))
            }
            _ => false,
        }
    }

    /// Deliver a key event along the focus path below `id`.
    ///
    /// The child on the path to the focused widget goes first. If nothing
    /// below handled it, the focused widget's kind gets it, and finally an
    /// `on_key_press` callback on `id` consumes it.
    pub fn key_event(&mut self, id: WidgetId, event: &KeyEvent) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        if !node.is_visible() || !node.enabled {
            return false;
        }

        if let Some(focus) = self.focused {
            let children = node.children.clone();
            for child in children {
                if (child == focus || self.is_ancestor(child, focus)) && self.key_event(child, event) {
                    return true;
                }
            }
        }

        let mut handled = false;
        if self.focused == Some(id)
            && let Some(node) = self.arena.get_mut(id)
        {
            let state = node.state();
            let result = node.kind.on_key_event(&state, event);
            handled = result.is_handled();
            if handled {
                self.invalidate(id);
                self.fire_result(id, result);
            }
        }

        if self.fire_key_press(id, event) {
            handled = true;
        }
        handled
    }

    // ---------------------------------------------------------------------
    // Callback plumbing
    // ---------------------------------------------------------------------
    //
    // Handlers are taken out of the node while they run and put back unless
    // the handler was replaced in the meantime.

    /// Run the callback a kind's event result asks for.
    fn fire_result(&mut self, id: WidgetId, result: EventResult) {
        match result {
            EventResult::Clicked => self.fire_click(id),
            EventResult::TextChanged => self.fire_text_changed(id),
            EventResult::Submitted => self.fire_submit(id),
            EventResult::Ignored | EventResult::Captured => {}
        }
    }

    fn fire_click(&mut self, id: WidgetId) {
        let Some(mut handler) = self.arena.get_mut(id).and_then(|n| n.handlers.on_click.take()) else {
            return;
        };
        handler(id);
        if let Some(node) = self.arena.get_mut(id)
            && node.handlers.on_click.is_none()
        {
            node.handlers.on_click = Some(handler);
        }
    }

    fn fire_mouse_move(&mut self, id: WidgetId, event: &MouseEvent) {
        let Some(mut handler) = self.arena.get_mut(id).and_then(|n| n.handlers.on_mouse_move.take()) else {
            return;
        };
        handler(id, event);
        if let Some(node) = self.arena.get_mut(id)
            && node.handlers.on_mouse_move.is_none()
        {
            node.handlers.on_mouse_move = Some(handler);
        }
    }

    fn fire_text_changed(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        let text = node.kind.text_content().unwrap_or_default().to_owned();
        let Some(mut handler) = node.handlers.on_text_changed.take() else {
            return;
        };
        handler(id, &text);
        if let Some(node) = self.arena.get_mut(id)
            && node.handlers.on_text_changed.is_none()
        {
            node.handlers.on_text_changed = Some(handler);
        }
    }

    fn fire_submit(&mut self, id: WidgetId) {
        let Some(mut handler) = self.arena.get_mut(id).and_then(|n| n.handlers.on_submit.take()) else {
            return;
        };
        handler(id);
        if let Some(node) = self.arena.get_mut(id)
            && node.handlers.on_submit.is_none()
        {
            node.handlers.on_submit = Some(handler);
        }
    }

    fn fire_key_press(&mut self, id: WidgetId, event: &KeyEvent) -> bool {
        let Some(mut handler) = self.arena.get_mut(id).and_then(|n| n.handlers.on_key_press.take()) else {
            return false;
        };
        handler(id, event);
        if let Some(node) = self.arena.get_mut(id)
            && node.handlers.on_key_press.is_none()
        {
            node.handlers.on_key_press = Some(handler);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::event_context::{Key, KeyEvent, Modifiers, MouseButton, MouseEvent, NamedKey};
    use crate::layout::StackLayout;
    use crate::primitives::{Point, Rect, Size};
    use crate::tree::{WidgetId, WidgetTree};
    use crate::widget::Visibility;
    use crate::widgets::{Button, Panel, TextBox};

    /// root (0,0 200x200) > panel at (50,50 100x100) > inner at (10,10 20x20)
    fn nested() -> (WidgetTree, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        let panel = tree.create(Panel::new());
        let inner = tree.create(Panel::new());
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, inner).unwrap();

        tree.arrange(root, Rect::new(0.0, 0.0, 200.0, 200.0));
        tree.arrange(panel, Rect::new(50.0, 50.0, 100.0, 100.0));
        tree.arrange(inner, Rect::new(10.0, 10.0, 20.0, 20.0));
        (tree, root, panel, inner)
    }

    fn press(x: f32, y: f32) -> MouseEvent {
        MouseEvent::ButtonPressed { button: MouseButton::Left, position: Point::new(x, y) }
    }

    fn release(x: f32, y: f32) -> MouseEvent {
        MouseEvent::ButtonReleased { button: MouseButton::Left, position: Point::new(x, y) }
    }

    #[test]
    fn test_find_widget_at_descends() {
        let (tree, root, panel, inner) = nested();
        assert_eq!(tree.find_widget_at(root, Point::new(65.0, 65.0)), Some(inner));
        assert_eq!(tree.find_widget_at(root, Point::new(120.0, 120.0)), Some(panel));
        assert_eq!(tree.find_widget_at(root, Point::new(10.0, 10.0)), Some(root));
        assert_eq!(tree.find_widget_at(root, Point::new(250.0, 10.0)), None);
    }

    #[test]
    fn test_find_widget_at_prefers_topmost() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        let below = tree.create(Panel::new());
        let above = tree.create(Panel::new());
        tree.add_child(root, below).unwrap();
        tree.add_child(root, above).unwrap();
        tree.arrange(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.arrange(below, Rect::new(0.0, 0.0, 50.0, 50.0));
        tree.arrange(above, Rect::new(25.0, 25.0, 50.0, 50.0));

        assert_eq!(tree.find_widget_at(root, Point::new(30.0, 30.0)), Some(above));

        tree.set_visibility(above, Visibility::Hidden);
        assert_eq!(tree.find_widget_at(root, Point::new(30.0, 30.0)), Some(below));
    }

    #[test]
    fn test_coordinate_transforms() {
        let (tree, _root, _panel, inner) = nested();
        assert_eq!(tree.local_to_global(inner, Point::new(5.0, 5.0)), Point::new(65.0, 65.0));
        assert_eq!(tree.global_to_local(inner, Point::new(65.0, 65.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_hover_tracks_cursor() {
        let (mut tree, root, panel, inner) = nested();
        tree.mouse_event(root, &MouseEvent::CursorMoved { position: Point::new(65.0, 65.0) });
        assert!(tree.node(panel).unwrap().is_hovered());
        assert!(tree.node(inner).unwrap().is_hovered());

        tree.mouse_event(root, &MouseEvent::CursorMoved { position: Point::new(140.0, 140.0) });
        assert!(tree.node(panel).unwrap().is_hovered());
        assert!(!tree.node(inner).unwrap().is_hovered());
    }

    #[test]
    fn test_mouse_move_callback() {
        let (mut tree, root, panel, _inner) = nested();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tree.on_mouse_move(panel, move |_, event| sink.borrow_mut().push(event.position()));

        tree.mouse_event(root, &MouseEvent::CursorMoved { position: Point::new(60.0, 70.0) });
        tree.mouse_event(root, &MouseEvent::CursorMoved { position: Point::new(5.0, 5.0) });

        // Delivered in the panel's parent space (the root's local space).
        assert_eq!(*seen.borrow(), vec![Point::new(60.0, 70.0)]);
    }

    #[test]
    fn test_button_click_fires_callback() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_layout(root, StackLayout::vertical());
        let button = tree.create(Button::new("OK"));
        tree.add_child(root, button).unwrap();
        tree.measure(root, Size::new(200.0, 200.0));
        tree.arrange(root, Rect::new(0.0, 0.0, 200.0, 200.0));

        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        tree.on_click(button, move |_| *counter.borrow_mut() += 1);

        assert!(tree.mouse_event(root, &press(5.0, 5.0)));
        assert!(tree.mouse_event(root, &release(5.0, 5.0)));
        assert_eq!(*clicks.borrow(), 1);

        // Release outside cancels.
        tree.mouse_event(root, &press(5.0, 5.0));
        tree.mouse_event(root, &release(190.0, 190.0));
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_disabled_widget_ignores_clicks() {
        let mut tree = WidgetTree::new();
        let button = tree.create(Button::new("OK"));
        tree.arrange(button, Rect::new(0.0, 0.0, 50.0, 20.0));
        tree.set_enabled(button, false);

        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        tree.on_click(button, move |_| *counter.borrow_mut() += 1);

        assert!(!tree.mouse_event(button, &press(5.0, 5.0)));
        assert!(!tree.mouse_event(button, &release(5.0, 5.0)));
        assert_eq!(*clicks.borrow(), 0);
    }

    #[test]
    fn test_keys_follow_focus() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_layout(root, StackLayout::vertical());
        let first = tree.create(TextBox::new());
        let second = tree.create(TextBox::new());
        tree.add_child(root, first).unwrap();
        tree.add_child(root, second).unwrap();
        tree.measure(root, Size::new(300.0, 300.0));
        tree.arrange(root, Rect::new(0.0, 0.0, 300.0, 300.0));

        // Click the second box to focus it.
        let second_center = tree.bounds(second).unwrap().center();
        tree.mouse_event(root, &press(second_center.x, second_center.y));
        assert_eq!(tree.focused(), Some(second));

        let typed = KeyEvent::Pressed {
            key: Key::character("h"),
            modifiers: Modifiers::NONE,
            text: Some(String::from("h")),
        };
        assert!(tree.key_event(root, &typed));
        assert_eq!(tree.widget::<TextBox>(second).unwrap().text(), "h");
        assert_eq!(tree.widget::<TextBox>(first).unwrap().text(), "");

        let backspace = KeyEvent::Pressed {
            key: Key::named(NamedKey::Backspace),
            modifiers: Modifiers::NONE,
            text: None,
        };
        assert!(tree.key_event(root, &backspace));
        assert_eq!(tree.widget::<TextBox>(second).unwrap().text(), "");
    }

    #[test]
    fn test_key_press_callback_consumes() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        let event = KeyEvent::Pressed {
            key: Key::named(NamedKey::Escape),
            modifiers: Modifiers::NONE,
            text: None,
        };
        assert!(!tree.key_event(root, &event));

        let seen = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&seen);
        tree.on_key_press(root, move |_, _| *flag.borrow_mut() = true);
        assert!(tree.key_event(root, &event));
        assert!(*seen.borrow());
    }

    #[test]
    fn test_text_box_fires_text_changed_and_submit() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        let text_box = tree.create(TextBox::new());
        tree.add_child(root, text_box).unwrap();
        tree.arrange(root, Rect::new(0.0, 0.0, 200.0, 40.0));
        tree.arrange(text_box, Rect::new(0.0, 0.0, 200.0, 40.0));
        tree.set_focus(Some(text_box));

        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&changes);
        tree.on_text_changed(text_box, move |_, text| log.borrow_mut().push(text.to_owned()));
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        tree.on_submit(text_box, move |id| sink.borrow_mut().push(id));

        for c in ["o", "k"] {
            let typed = KeyEvent::Pressed {
                key: Key::character(c),
                modifiers: Modifiers::NONE,
                text: Some(c.to_owned()),
            };
            assert!(tree.key_event(root, &typed));
        }
        // Moving the caret edits nothing.
        let left = KeyEvent::Pressed {
            key: Key::named(NamedKey::ArrowLeft),
            modifiers: Modifiers::NONE,
            text: None,
        };
        assert!(tree.key_event(root, &left));
        assert_eq!(*changes.borrow(), vec![String::from("o"), String::from("ok")]);

        let enter = KeyEvent::Pressed {
            key: Key::named(NamedKey::Enter),
            modifiers: Modifiers::NONE,
            text: None,
        };
        assert!(tree.key_event(root, &enter));
        assert_eq!(*submitted.borrow(), vec![text_box]);
        assert_eq!(changes.borrow().len(), 2);

        // Programmatic edits stay silent.
        tree.update_widget::<TextBox, _>(text_box, |t| t.set_text("reset"));
        assert_eq!(changes.borrow().len(), 2);
    }
}
