//! Single-line text editor.

use super::impl_widget_any;
use crate::event_context::{EventResult, Key, KeyEvent, MouseButton, MouseEvent, NamedKey};
use crate::primitives::{Color, Point, Rect, Size};
use crate::render::{Font, Renderer, TextAlignment, TextMeasure};
use crate::widget::{Widget, WidgetState};

/// Desired width of a text box, independent of its content.
const DEFAULT_WIDTH: f32 = 150.0;

/// A single-line editable text field.
///
/// Clicking focuses it. While focused, typed text is inserted at the
/// cursor, Backspace/Delete remove characters, and the arrow, Home and End
/// keys move the cursor (Shift extends the selection, Ctrl+A selects all).
/// Typing over a selection replaces it. Enter submits.
///
/// The cursor and selection are char offsets. A selection is stored as
/// `(anchor, cursor)` and is never empty.
#[derive(Debug, Clone)]
pub struct TextBox {
    text: String,
    placeholder: String,
    font: Font,
    text_color: Color,
    placeholder_color: Color,
    selection_color: Color,
    background: Color,
    border: Color,
    focus_border: Color,
    read_only: bool,
    password_mode: bool,
    password_char: char,
    max_length: Option<usize>,
    cursor: usize,
    selection: Option<(usize, usize)>,
    focused: bool,
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBox {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            placeholder: String::new(),
            font: Font::default(),
            text_color: Color::TEXT,
            placeholder_color: Color::BORDER,
            selection_color: Color::rgba(0.0, 0.47, 0.84, 0.4),
            background: Color::WHITE,
            border: Color::BORDER,
            focus_border: Color::rgb(0.2, 0.45, 0.85),
            read_only: false,
            password_mode: false,
            password_char: '*',
            max_length: None,
            cursor: 0,
            selection: None,
            focused: false,
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut text_box = Self::new();
        text_box.set_text(text);
        text_box
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Mask the content with the password char when painting.
    pub fn password(mut self, password: bool) -> Self {
        self.password_mode = password;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.set_max_length(Some(max_length));
        self
    }

    // =====================================================================
    // Properties
    // =====================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content, truncated to the max length, and move the
    /// cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = match self.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text,
        };
        self.cursor = self.char_count();
        self.selection = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the text, dropping any selection.
    pub fn set_cursor(&mut self, position: usize) {
        self.move_to(position, false);
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_password_mode(&self) -> bool {
        self.password_mode
    }

    pub fn set_password_mode(&mut self, password: bool) {
        self.password_mode = password;
    }

    pub fn password_char(&self) -> char {
        self.password_char
    }

    pub fn set_password_char(&mut self, mask: char) {
        self.password_char = mask;
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Limit the content to `max_length` chars. Existing text is truncated.
    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
        if let Some(max) = max_length
            && self.char_count() > max
        {
            let text = std::mem::take(&mut self.text);
            self.set_text(text);
        }
    }

    /// What gets painted: the text, or one mask char per char in password mode.
    pub fn display_text(&self) -> String {
        if self.password_mode {
            std::iter::repeat_n(self.password_char, self.char_count()).collect()
        } else {
            self.text.clone()
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    // =====================================================================
    // Selection
    // =====================================================================

    /// Select `start..end` (either order). The cursor lands on `end`.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_count();
        let (start, end) = (start.min(len), end.min(len));
        self.cursor = end;
        self.selection = (start != end).then_some((start, end));
    }

    /// The selected range, low end first.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection.map(|(a, b)| (a.min(b), a.max(b)))
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn select_all(&mut self) {
        self.set_selection(0, self.char_count());
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected_text(&self) -> &str {
        match self.selection() {
            Some((lo, hi)) => &self.text[self.byte_offset(lo)..self.byte_offset(hi)],
            None => "",
        }
    }

    /// Delete the current selection, if any. Returns true if a selection existed.
    pub fn delete_selection(&mut self) -> bool {
        let Some((lo, hi)) = self.selection() else {
            return false;
        };
        let (start, end) = (self.byte_offset(lo), self.byte_offset(hi));
        self.text.replace_range(start..end, "");
        self.cursor = lo;
        self.selection = None;
        true
    }

    // =====================================================================
    // Editing
    // =====================================================================

    /// Insert a string at the cursor, replacing the selection. Anything past
    /// the max length is dropped.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        let room = match self.max_length {
            Some(max) => max.saturating_sub(self.char_count()),
            None => usize::MAX,
        };
        let inserted: String = s.chars().take(room).collect();
        if inserted.is_empty() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, &inserted);
        self.cursor += inserted.chars().count();
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    pub fn delete(&mut self) {
        if self.delete_selection() || self.cursor >= self.char_count() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Move the cursor to `target`. With `extend`, the selection grows from
    /// its anchor (or the old cursor); otherwise it is dropped.
    fn move_to(&mut self, target: usize, extend: bool) {
        let target = target.min(self.char_count());
        if extend {
            let anchor = self.selection.map(|(a, _)| a).unwrap_or(self.cursor);
            self.selection = (anchor != target).then_some((anchor, target));
        } else {
            self.selection = None;
        }
        self.cursor = target;
    }

    pub fn move_left(&mut self) {
        self.move_to(self.cursor.saturating_sub(1), false);
    }

    pub fn move_right(&mut self) {
        self.move_to(self.cursor + 1, false);
    }

    pub fn move_home(&mut self) {
        self.move_to(0, false);
    }

    pub fn move_end(&mut self) {
        self.move_to(self.char_count(), false);
    }

    pub fn select_left(&mut self) {
        self.move_to(self.cursor.saturating_sub(1), true);
    }

    pub fn select_right(&mut self) {
        self.move_to(self.cursor + 1, true);
    }

    pub fn select_home(&mut self) {
        self.move_to(0, true);
    }

    pub fn select_end(&mut self) {
        self.move_to(self.char_count(), true);
    }

    /// Horizontal offset of a char position within the painted text.
    fn offset_x(&self, position: usize, text: &dyn TextMeasure) -> f32 {
        let before: String = self.display_text().chars().take(position).collect();
        text.measure_text(&before, &self.font, None).width
    }

    /// The caret as a 1px-wide rect in the widget's local space.
    pub fn caret_rect(&self, state: &WidgetState, text: &dyn TextMeasure) -> Rect {
        let content = state.content_rect();
        let x = content.x + self.offset_x(self.cursor, text);
        Rect::new(x, content.y, 1.0, content.height)
    }

    /// The highlighted span of the selection in the widget's local space.
    pub fn selection_rect(&self, state: &WidgetState, text: &dyn TextMeasure) -> Option<Rect> {
        let (lo, hi) = self.selection()?;
        let content = state.content_rect();
        let start = self.offset_x(lo, text);
        let end = self.offset_x(hi, text);
        Some(Rect::new(content.x + start, content.y, end - start, content.height))
    }

    fn handle_key(&mut self, event: &KeyEvent) -> EventResult {
        let KeyEvent::Pressed { key, modifiers, text } = event else {
            return EventResult::Ignored;
        };

        let before = self.text.clone();
        let shift = modifiers.shift;
        match key {
            Key::Named(NamedKey::ArrowLeft) => self.move_to(self.cursor.saturating_sub(1), shift),
            Key::Named(NamedKey::ArrowRight) => self.move_to(self.cursor + 1, shift),
            Key::Named(NamedKey::Home) => self.move_to(0, shift),
            Key::Named(NamedKey::End) => self.move_to(self.char_count(), shift),
            Key::Named(NamedKey::Enter) => return EventResult::Submitted,
            Key::Named(NamedKey::Backspace) if !self.read_only => self.backspace(),
            Key::Named(NamedKey::Delete) if !self.read_only => self.delete(),
            Key::Named(NamedKey::Space) if !self.read_only => self.insert_str(" "),
            Key::Character(c) if modifiers.ctrl && c.eq_ignore_ascii_case("a") => self.select_all(),
            Key::Character(c) if !self.read_only && !modifiers.ctrl && !modifiers.alt => {
                let typed = text.as_deref().unwrap_or(c);
                let printable: String = typed.chars().filter(|ch| !ch.is_control()).collect();
                if printable.is_empty() {
                    return EventResult::Ignored;
                }
                self.insert_str(&printable);
            }
            _ => return EventResult::Ignored,
        }

        if self.text != before {
            EventResult::TextChanged
        } else {
            EventResult::Captured
        }
    }
}

impl Widget for TextBox {
    fn type_name(&self) -> &'static str {
        "TextBox"
    }

    impl_widget_any!();

    /// Fixed width, one line tall.
    fn measure_content(&self, _available: Size, text: &dyn TextMeasure) -> Option<Size> {
        let line = text.measure_text("M", &self.font, None);
        Some(Size::new(DEFAULT_WIDTH, line.height))
    }

    fn render(&self, state: &WidgetState, renderer: &mut dyn Renderer) {
        let local = state.local_bounds();
        renderer.fill_rectangle(local, self.background);
        let border = if self.focused { self.focus_border } else { self.border };
        renderer.draw_rectangle(local, border, 1.0);

        let content = state.content_rect();
        renderer.push_clip_rect(content);

        if self.focused
            && let Some((lo, hi)) = self.selection()
        {
            let display = self.display_text();
            let start: String = display.chars().take(lo).collect();
            let end: String = display.chars().take(hi).collect();
            let x0 = renderer.measure_text(&start, &self.font, None).width;
            let x1 = renderer.measure_text(&end, &self.font, None).width;
            renderer.fill_rectangle(
                Rect::new(content.x + x0, content.y, x1 - x0, content.height),
                self.selection_color,
            );
        }

        if self.text.is_empty() {
            if !self.placeholder.is_empty() && !self.focused {
                renderer.draw_text(&self.placeholder, content, &self.font, self.placeholder_color, TextAlignment::Left);
            }
        } else {
            renderer.draw_text(&self.display_text(), content, &self.font, self.text_color, TextAlignment::Left);
        }

        if self.focused && !self.read_only {
            let before: String = self.display_text().chars().take(self.cursor).collect();
            let x = content.x + renderer.measure_text(&before, &self.font, None).width;
            renderer.draw_line(
                Point::new(x, content.y),
                Point::new(x, content.bottom()),
                self.text_color,
                1.0,
            );
        }

        renderer.pop_clip_rect();
    }

    fn on_mouse_event(&mut self, state: &WidgetState, event: &MouseEvent) -> EventResult {
        match event {
            MouseEvent::ButtonPressed { button: MouseButton::Left, position } if state.bounds.contains(*position) => {
                EventResult::Captured
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_key_event(&mut self, state: &WidgetState, event: &KeyEvent) -> EventResult {
        if !state.enabled {
            return EventResult::Ignored;
        }
        self.handle_key(event)
    }

    fn on_focus_changed(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.selection = None;
        }
    }

    fn accepts_focus(&self) -> bool {
        true
    }

    fn text_content(&self) -> Option<&str> {
        Some(&self.text)
    }
}
