//! Trellis: Retained-Mode Widget Tree and Layout Engine
//!
//! Trellis keeps a tree of widgets and sizes it with a two-pass protocol:
//! - Measure: every widget reports the size it wants for a given available
//!   size, without touching its bounds
//! - Arrange: parents commit each child's final rect, top down
//!
//! Containers delegate both passes to a pluggable [`Layout`] strategy
//! ([`StackLayout`], [`GridLayout`]) or place children manually.
//!
//! # Architecture
//!
//! Widgets live in a [`WidgetTree`] arena keyed by [`WidgetId`]. A parent owns
//! its children through an ordered id list; the parent link is a plain id
//! used only for upward walks, so the tree has no reference cycles. Each
//! node carries a boxed [`Widget`] kind for the parts that differ between a
//! label and a button: content size, paint, input.
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{Host, HostConfig, StackLayout, Button};
//!
//! let mut host = Host::new(HostConfig::default())?;
//! let root = host.root();
//! let tree = host.tree_mut();
//! tree.set_layout(root, StackLayout::vertical().with_spacing(8.0));
//! let ok = tree.create(Button::new("OK"));
//! tree.add_child(root, ok)?;
//! host.resize(640.0, 480.0);
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;
pub mod event_context;

// Rendering contracts
pub mod render;

// Widget system
pub mod widget;
pub mod tree;
pub mod widgets;

// Layout strategies
pub mod layout;

// Host glue
pub mod host;

// Re-export core types
pub use primitives::{Color, Point, Rect, Size, Spacing};
pub use error::{ConfigError, TreeError};
pub use config::HostConfig;
pub use event_context::{
    Event, EventDispatcher, EventResult, Key, KeyEvent, Modifiers, MouseButton, MouseEvent, NamedKey,
};
pub use render::{DisplayList, DrawCommand, EstimatedTextMeasure, Font, Renderer, TextAlignment, TextMeasure};
pub use widget::{Chrome, Visibility, Widget, WidgetState};
pub use tree::{WidgetId, WidgetNode, WidgetTree};
pub use widgets::{Button, Label, Panel, TextBox};
pub use layout::{
    GridDefinition, GridLayout, GridLength, GridPosition, HorizontalAlignment, Layout, LayoutBase, Orientation,
    StackAlignment, StackLayout, VerticalAlignment,
};
pub use host::Host;
