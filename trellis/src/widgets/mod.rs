//! Trellis Widgets
//!
//! Built-in widget kinds. Each one only contributes what differs between
//! kinds: content size, paint, and input handling. Geometry, hierarchy and
//! layout properties live on the tree node.

mod button;
mod label;
mod panel;
mod text_box;

pub use button::Button;
pub use label::Label;
pub use panel::Panel;
pub(crate) use panel::clamp_scroll_offset;
pub use text_box::TextBox;

/// Implements the `Any` plumbing every kind needs.
macro_rules! impl_widget_any {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

pub(crate) use impl_widget_any;
