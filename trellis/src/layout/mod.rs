//! Trellis Layout
//!
//! Layout strategies attached to container widgets. A strategy sizes and
//! places a container's children in two passes: measure (pure, returns the
//! size the children want) and arrange (commits each child's bounds).
//!
//! # Strategies
//! - [`StackLayout`]: a single row or column with spacing and fill-last.
//! - [`GridLayout`]: rows and columns of fixed, auto and star tracks.
//!
//! Containers without a strategy place children at their manual positions.

mod alignment;
mod base;
mod grid;
mod stack;
pub mod tracks;

pub use alignment::{HorizontalAlignment, Orientation, StackAlignment, VerticalAlignment};
pub use base::{Layout, LayoutBase, apply_alignment, apply_constraints};
pub use grid::{GridDefinition, GridLayout, GridLength, GridPosition};
pub use stack::StackLayout;
pub use tracks::{TrackRequest, TrackResolution, resolve_tracks};
