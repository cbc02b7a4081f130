//! Push button.

use super::impl_widget_any;
use crate::event_context::{EventResult, MouseButton, MouseEvent};
use crate::primitives::{Color, Size};
use crate::render::{Font, Renderer, TextAlignment, TextMeasure};
use crate::widget::{Widget, WidgetState};

/// Room around the label for the button face.
const CHROME_ALLOWANCE: Size = Size::new(20.0, 10.0);

/// A clickable text button. A left press followed by a release inside the
/// bounds completes a click and fires the node's `on_click`.
#[derive(Debug, Clone)]
pub struct Button {
    text: String,
    font: Font,
    text_color: Color,
    background: Color,
    hover_background: Color,
    pressed_background: Color,
    disabled_background: Color,
    corner_radius: f32,
    pressed: bool,
    hovered: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            text_color: Color::TEXT,
            background: Color::CONTROL,
            hover_background: Color::CONTROL_HOVER,
            pressed_background: Color::CONTROL_PRESSED,
            disabled_background: Color::CONTROL_DISABLED,
            corner_radius: 0.0,
            pressed: false,
            hovered: false,
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn face_color(&self, state: &WidgetState) -> Color {
        if !state.enabled {
            self.disabled_background
        } else if self.pressed {
            self.pressed_background
        } else if self.hovered {
            self.hover_background
        } else {
            self.background
        }
    }
}

impl Widget for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    impl_widget_any!();

    fn measure_content(&self, _available: Size, text: &dyn TextMeasure) -> Option<Size> {
        let label = text.measure_text(&self.text, &self.font, None);
        Some(Size::new(
            label.width + CHROME_ALLOWANCE.width,
            label.height + CHROME_ALLOWANCE.height,
        ))
    }

    fn render(&self, state: &WidgetState, renderer: &mut dyn Renderer) {
        let face = self.face_color(state);
        let local = state.local_bounds();
        if self.corner_radius > 0.0 {
            renderer.fill_rounded_rectangle(local, self.corner_radius, face);
        } else {
            renderer.fill_rectangle(local, face);
        }

        if !self.text.is_empty() {
            renderer.draw_text(&self.text, state.content_rect(), &self.font, self.text_color, TextAlignment::Center);
        }
    }

    fn on_mouse_event(&mut self, state: &WidgetState, event: &MouseEvent) -> EventResult {
        match event {
            MouseEvent::ButtonPressed { button: MouseButton::Left, position } if state.bounds.contains(*position) => {
                self.pressed = true;
                EventResult::Captured
            }
            MouseEvent::ButtonReleased { button: MouseButton::Left, position } if self.pressed => {
                self.pressed = false;
                if state.bounds.contains(*position) {
                    EventResult::Clicked
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_hover_changed(&mut self, hovered: bool) {
        self.hovered = hovered;
    }
}
