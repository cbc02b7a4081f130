//! Rendering contracts.
//!
//! The layout engine never draws. Widget kinds paint through the abstract
//! [`Renderer`] during a paint pass that runs after arrange, and leaf kinds
//! size themselves through [`TextMeasure`] during measure.
//!
//! [`DisplayList`] is a recording renderer: it resolves the transform stack
//! into absolute coordinates and keeps the commands, which is all a test or
//! a headless host needs.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::primitives::{Color, Point, Rect, Size};

// =========================================================================
// Font
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal placement of text inside its rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A font request. Resolution to an actual face is the backend's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            size: 12.0,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

// =========================================================================
// Contracts
// =========================================================================

/// Text measurement used by leaf widgets during measure.
///
/// Must be pure. `max_width = None` measures a single unwrapped line;
/// `Some(w)` wraps at `w`, and a wider `w` never yields a taller result.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, font: &Font, max_width: Option<f32>) -> Size;
}

/// Abstract 2D drawing surface consumed by the paint pass.
pub trait Renderer: TextMeasure {
    fn fill_rectangle(&mut self, rect: Rect, color: Color);
    fn draw_rectangle(&mut self, rect: Rect, color: Color, width: f32);
    fn fill_rounded_rectangle(&mut self, rect: Rect, radius: f32, color: Color);
    fn draw_rounded_rectangle(&mut self, rect: Rect, radius: f32, color: Color, width: f32);
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);
    fn draw_text(&mut self, text: &str, rect: Rect, font: &Font, color: Color, alignment: TextAlignment);

    fn push_clip_rect(&mut self, rect: Rect);
    fn pop_clip_rect(&mut self);

    fn push_transform(&mut self);
    fn pop_transform(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
}

// =========================================================================
// EstimatedTextMeasure
// =========================================================================

/// Display-width text estimate: every cell is `char_width * font.size` wide,
/// every line `line_height * font.size` tall. Wide (CJK) chars take two cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            line_height: 1.2,
        }
    }
}

impl EstimatedTextMeasure {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self { char_width, line_height }
    }
}

/// Estimate display width in cell units (1 for Latin, 2 for CJK, 0 for combining marks).
pub(crate) fn unicode_display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}

impl TextMeasure for EstimatedTextMeasure {
    fn measure_text(&self, text: &str, font: &Font, max_width: Option<f32>) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let cell = font.size * self.char_width;
        let line = font.size * self.line_height;
        let cells = unicode_display_width(text);
        let natural = cells * cell;

        match max_width {
            Some(limit) if limit.is_finite() && limit > 0.0 && natural > limit && cell > 0.0 => {
                let cells_per_line = (limit / cell).floor().max(1.0);
                let lines = (cells / cells_per_line).ceil().max(1.0);
                Size::new(natural.min(limit.max(cell)), lines * line)
            }
            _ => Size::new(natural, line),
        }
    }
}

// =========================================================================
// DisplayList
// =========================================================================

/// A recorded drawing operation, in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, radius: f32, color: Color },
    StrokeRect { rect: Rect, radius: f32, color: Color, width: f32 },
    Line { from: Point, to: Point, color: Color, width: f32 },
    Text { text: String, rect: Rect, size: f32, color: Color, alignment: TextAlignment },
    PushClip(Rect),
    PopClip,
}

/// Recording [`Renderer`].
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    offset: Point,
    saved: Vec<Point>,
    clip_depth: usize,
    measure: EstimatedTextMeasure,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measure(measure: EstimatedTextMeasure) -> Self {
        Self {
            measure,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current translation applied to incoming coordinates.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Whether every push had a matching pop.
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty() && self.clip_depth == 0
    }

    /// Text runs in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    #[inline]
    fn abs(&self, rect: Rect) -> Rect {
        rect.translate(self.offset)
    }
}

impl TextMeasure for DisplayList {
    fn measure_text(&self, text: &str, font: &Font, max_width: Option<f32>) -> Size {
        self.measure.measure_text(text, font, max_width)
    }
}

impl Renderer for DisplayList {
    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        let rect = self.abs(rect);
        self.commands.push(DrawCommand::FillRect { rect, radius: 0.0, color });
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color, width: f32) {
        let rect = self.abs(rect);
        self.commands.push(DrawCommand::StrokeRect { rect, radius: 0.0, color, width });
    }

    fn fill_rounded_rectangle(&mut self, rect: Rect, radius: f32, color: Color) {
        let rect = self.abs(rect);
        self.commands.push(DrawCommand::FillRect { rect, radius, color });
    }

    fn draw_rounded_rectangle(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        let rect = self.abs(rect);
        self.commands.push(DrawCommand::StrokeRect { rect, radius, color, width });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let (from, to) = (from + self.offset, to + self.offset);
        self.commands.push(DrawCommand::Line { from, to, color, width });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font: &Font, color: Color, alignment: TextAlignment) {
        let rect = self.abs(rect);
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            rect,
            size: font.size,
            color,
            alignment,
        });
    }

    fn push_clip_rect(&mut self, rect: Rect) {
        let rect = self.abs(rect);
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip_rect(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }

    fn push_transform(&mut self) {
        self.saved.push(self.offset);
    }

    fn pop_transform(&mut self) {
        self.offset = self.saved.pop().unwrap_or(Point::ORIGIN);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset + Point::new(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_single_line() {
        let measure = EstimatedTextMeasure::default();
        let font = Font::new("sans-serif", 10.0);
        let size = measure.measure_text("Hello", &font, None);
        assert_eq!(size, Size::new(30.0, 12.0));
        assert_eq!(measure.measure_text("", &font, None), Size::ZERO);
    }

    #[test]
    fn test_estimate_wide_chars() {
        let measure = EstimatedTextMeasure::default();
        let font = Font::new("sans-serif", 10.0);
        // Two CJK characters occupy four cells.
        assert_eq!(measure.measure_text("日本", &font, None).width, 24.0);
    }

    #[test]
    fn test_estimate_wrapping() {
        let measure = EstimatedTextMeasure::default();
        let font = Font::new("sans-serif", 10.0);
        // 10 chars * 6px = 60px natural; wrap at 30px => 5 per line => 2 lines.
        let size = measure.measure_text("abcdefghij", &font, Some(30.0));
        assert_eq!(size, Size::new(30.0, 24.0));

        // Enough room: single line, natural width.
        let wide = measure.measure_text("abcdefghij", &font, Some(100.0));
        assert_eq!(wide, Size::new(60.0, 12.0));
    }

    #[test]
    fn test_wider_limit_never_taller() {
        let measure = EstimatedTextMeasure::default();
        let font = Font::default();
        let text = "the quick brown fox jumps over the lazy dog";
        let mut previous = f32::INFINITY;
        for limit in [5.0, 20.0, 50.0, 80.0, 120.0, 400.0, 1000.0] {
            let height = measure.measure_text(text, &font, Some(limit)).height;
            assert!(height <= previous, "height grew at limit {limit}");
            previous = height;
        }
    }

    #[test]
    fn test_display_list_resolves_transforms() {
        let mut list = DisplayList::new();
        list.push_transform();
        list.translate(10.0, 20.0);
        list.fill_rectangle(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLACK);
        list.push_transform();
        list.translate(1.0, 1.0);
        list.draw_text("x", Rect::new(0.0, 0.0, 5.0, 5.0), &Font::default(), Color::BLACK, TextAlignment::Left);
        list.pop_transform();
        list.pop_transform();

        assert!(list.is_balanced());
        assert_eq!(
            list.commands()[0],
            DrawCommand::FillRect { rect: Rect::new(10.0, 20.0, 5.0, 5.0), radius: 0.0, color: Color::BLACK }
        );
        match &list.commands()[1] {
            DrawCommand::Text { rect, .. } => assert_eq!(*rect, Rect::new(11.0, 21.0, 5.0, 5.0)),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["x"]);
    }
}
