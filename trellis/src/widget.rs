//! Widget System
//!
//! Every node in a [`WidgetTree`](crate::tree::WidgetTree) carries a boxed
//! [`Widget`]: the kind-specific part of the node. The tree owns geometry,
//! hierarchy and layout properties; the kind only contributes what differs
//! between a label and a text box.
//!
//! # Sizing
//!
//! Leaf kinds report a content size through [`Widget::measure_content`]. The
//! tree adds the node's padding and clamps to its min/max. A kind that
//! returns `None` measures as its node's min size.
//!
//! # Events
//!
//! Mouse positions reach a kind in its parent's coordinate space, the same
//! space as [`WidgetState::bounds`]. Returning [`EventResult::Clicked`]
//! fires the node's `on_click` callback; [`EventResult::TextChanged`] and
//! [`EventResult::Submitted`] fire `on_text_changed` and `on_submit`.
//!
//! # Rendering
//!
//! `render` runs with the renderer already translated into the widget's
//! local space, after the node's chrome has been painted. Children are
//! painted and hit-tested shifted by [`Widget::scroll_offset`].

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::event_context::{EventResult, KeyEvent, MouseEvent};
use crate::primitives::{Color, Point, Rect, Size, Spacing};
use crate::render::{Renderer, TextMeasure};

/// Whether a widget is painted and whether it takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Painted, hit-tested, laid out.
    #[default]
    Visible,
    /// Laid out (keeps its space) but not painted or hit-tested.
    Hidden,
    /// Skipped by layouts entirely.
    Collapsed,
}

/// Node-level decoration painted before the kind's own content.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Chrome {
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: f32,
    pub corner_radius: f32,
}

impl Chrome {
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if this chrome has any visible decorations.
    #[inline]
    pub fn has_visible_chrome(&self) -> bool {
        self.background.is_some_and(|c| c.is_visible())
            || (self.border_width > 0.0 && self.border_color.is_some_and(|c| c.is_visible()))
    }
}

/// Read-only view of the node a kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetState {
    /// Arranged bounds in the parent's coordinate space.
    pub bounds: Rect,
    pub padding: Spacing,
    pub enabled: bool,
    pub focused: bool,
    pub hovered: bool,
}

impl WidgetState {
    /// Bounds in the widget's own coordinate space.
    #[inline]
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.bounds.width, self.bounds.height)
    }

    /// Local bounds inset by padding.
    #[inline]
    pub fn content_rect(&self) -> Rect {
        self.local_bounds().inset(&self.padding)
    }
}

/// The kind-specific part of a widget node.
pub trait Widget: Any {
    /// Short kind name used in logs and tree dumps.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Content size for the leaf case, excluding padding.
    ///
    /// `available` is the space inside the node's padding. Must be pure.
    fn measure_content(&self, _available: Size, _text: &dyn TextMeasure) -> Option<Size> {
        None
    }

    fn render(&self, _state: &WidgetState, _renderer: &mut dyn Renderer) {}

    fn on_mouse_event(&mut self, _state: &WidgetState, _event: &MouseEvent) -> EventResult {
        EventResult::Ignored
    }

    fn on_key_event(&mut self, _state: &WidgetState, _event: &KeyEvent) -> EventResult {
        EventResult::Ignored
    }

    fn on_hover_changed(&mut self, _hovered: bool) {}

    fn on_focus_changed(&mut self, _focused: bool) {}

    /// Whether a press that this kind handles should move keyboard focus to it.
    fn accepts_focus(&self) -> bool {
        false
    }

    /// Clip children to the content rect while painting.
    fn clips_children(&self) -> bool {
        false
    }

    /// How far the children are scrolled. Subtracted from their positions
    /// when painting and added back when hit-testing.
    fn scroll_offset(&self) -> Point {
        Point::ORIGIN
    }

    /// Editable or displayed text, handed to `on_text_changed` callbacks.
    fn text_content(&self) -> Option<&str> {
        None
    }
}
