//! Static text.

use super::impl_widget_any;
use crate::primitives::{Color, Size};
use crate::render::{Font, Renderer, TextAlignment, TextMeasure};
use crate::widget::{Widget, WidgetState};

/// A run of text sized by the tree's [`TextMeasure`].
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    font: Font,
    color: Color,
    alignment: TextAlignment,
    word_wrap: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            color: Color::TEXT,
            alignment: TextAlignment::Left,
            word_wrap: false,
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Wrap at the available width instead of measuring one line.
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Widget for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    impl_widget_any!();

    fn measure_content(&self, available: Size, text: &dyn TextMeasure) -> Option<Size> {
        let max_width = self.word_wrap.then_some(available.width);
        Some(text.measure_text(&self.text, &self.font, max_width))
    }

    fn render(&self, state: &WidgetState, renderer: &mut dyn Renderer) {
        if self.text.is_empty() {
            return;
        }
        renderer.draw_text(&self.text, state.content_rect(), &self.font, self.color, self.alignment);
    }
}
