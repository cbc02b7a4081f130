//! Input events and the explicit dispatch context.
//!
//! The host forwards native input into the widget tree as [`MouseEvent`]s and
//! [`KeyEvent`]s. Application-level listeners subscribe to an
//! [`EventDispatcher`] owned by the host; there is no process-global
//! dispatcher.

use crate::primitives::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types. Positions are in the receiving widget's parent space.
#[derive(Debug, Clone, PartialEq)]
pub enum MouseEvent {
    /// Mouse button pressed.
    ButtonPressed { button: MouseButton, position: Point },

    /// Mouse button released.
    ButtonReleased { button: MouseButton, position: Point },

    /// Mouse cursor moved.
    CursorMoved { position: Point },

    /// Mouse wheel scrolled.
    WheelScrolled { delta: f32, position: Point },
}

impl MouseEvent {
    /// The pointer position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            MouseEvent::ButtonPressed { position, .. }
            | MouseEvent::ButtonReleased { position, .. }
            | MouseEvent::CursorMoved { position }
            | MouseEvent::WheelScrolled { position, .. } => *position,
        }
    }

    /// The same event with its position shifted by `-offset`.
    ///
    /// Used when descending from a parent into a child's local space.
    pub fn translated(&self, offset: Point) -> Self {
        let mut event = self.clone();
        match &mut event {
            MouseEvent::ButtonPressed { position, .. }
            | MouseEvent::ButtonReleased { position, .. }
            | MouseEvent::CursorMoved { position }
            | MouseEvent::WheelScrolled { position, .. } => {
                *position = *position - offset;
            }
        }
        event
    }
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// Named keys (non-character keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,
    Unknown,
}

/// A keyboard key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named (special) key.
    Named(NamedKey),

    /// A character key.
    Character(String),
}

impl Key {
    pub fn named(key: NamedKey) -> Self {
        Self::Named(key)
    }

    pub fn character(c: impl Into<String>) -> Self {
        Self::Character(c.into())
    }
}

/// A key event (pressed or released).
#[derive(Debug, Clone, PartialEq)]
pub enum KeyEvent {
    /// A key was pressed.
    Pressed {
        key: Key,
        modifiers: Modifiers,
        /// The text produced by the key press, if any.
        text: Option<String>,
    },

    /// A key was released.
    Released { key: Key, modifiers: Modifiers },
}

/// Generic event type combining mouse and keyboard events.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mouse(MouseEvent),
    Keyboard(KeyEvent),
}

impl From<MouseEvent> for Event {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Self::Keyboard(event)
    }
}

/// Result of a widget kind handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, keep propagating.
    Ignored,

    /// Event was consumed, stop propagating.
    Captured,

    /// Event completed a click on the widget. Consumed; fires `on_click`.
    Clicked,

    /// Event edited the widget's text. Consumed; fires `on_text_changed`.
    TextChanged,

    /// Event confirmed the widget's input (Enter). Consumed; fires `on_submit`.
    Submitted,
}

impl EventResult {
    /// Check if the event was handled (anything but ignored).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

type Listener = Box<dyn FnMut(&Event, bool)>;

/// Application-level event fan-out, owned and passed explicitly by the host.
///
/// Listeners see every event after the widget tree had its turn, along with
/// whether any widget handled it.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Listener>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event, bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver an event to every listener in subscription order.
    pub fn dispatch(&mut self, event: &Event, handled: bool) {
        for listener in &mut self.listeners {
            listener(event, handled);
        }
    }

    /// Drop all listeners.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
