//! StackLayout - children in a single row or column.
//!
//! Children are measured independently against the full content size and
//! laid end to end along the main axis, with `spacing` only between
//! neighbours. The last child can be told to take whatever main-axis space
//! the others leave.

use std::any::Any;

use tracing::trace;

use super::alignment::{HorizontalAlignment, Orientation, StackAlignment, VerticalAlignment};
use super::base::{Layout, LayoutBase};
use crate::primitives::{Rect, Size, Spacing};
use crate::tree::{WidgetId, WidgetTree};

// =========================================================================
// StackLayout
// =========================================================================

/// Linear arrangement along one axis.
///
/// `horizontal_alignment` and `vertical_alignment` each govern their own
/// axis: along the main axis they position the whole run of children, along
/// the cross axis they position every child that does not carry its own
/// Center/End/Stretch alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    base: LayoutBase,
    orientation: Orientation,
    fill_last_child: bool,
    horizontal_alignment: StackAlignment,
    vertical_alignment: StackAlignment,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::new(Orientation::Vertical)
    }
}

impl StackLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            base: LayoutBase::default(),
            orientation,
            fill_last_child: false,
            horizontal_alignment: StackAlignment::Start,
            vertical_alignment: StackAlignment::Start,
        }
    }

    /// Children flow left to right.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Children flow top to bottom.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set spacing between consecutive children.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.set_spacing(spacing);
        self
    }

    pub fn with_fill_last_child(mut self, fill: bool) -> Self {
        self.fill_last_child = fill;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: StackAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: StackAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// The layout's own margin, applied inside the owner's content rect.
    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.base.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.base.padding = padding;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn spacing(&self) -> f32 {
        self.base.spacing
    }

    /// Negative spacing is treated as zero.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.base.spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
    }

    pub fn fill_last_child(&self) -> bool {
        self.fill_last_child
    }

    pub fn set_fill_last_child(&mut self, fill: bool) {
        self.fill_last_child = fill;
    }

    pub fn horizontal_alignment(&self) -> StackAlignment {
        self.horizontal_alignment
    }

    pub fn set_horizontal_alignment(&mut self, alignment: StackAlignment) {
        self.horizontal_alignment = alignment;
    }

    pub fn vertical_alignment(&self) -> StackAlignment {
        self.vertical_alignment
    }

    pub fn set_vertical_alignment(&mut self, alignment: StackAlignment) {
        self.vertical_alignment = alignment;
    }

    /// Alignment of the run of children along the main axis.
    fn main_alignment(&self) -> StackAlignment {
        match self.orientation {
            Orientation::Horizontal => self.horizontal_alignment,
            Orientation::Vertical => self.vertical_alignment,
        }
    }

    /// How a child sits on the cross axis: its own alignment when it asks
    /// for anything but the leading edge, otherwise the stack's.
    fn cross_placement(&self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> CrossPlacement {
        match self.orientation {
            Orientation::Horizontal => match vertical {
                VerticalAlignment::Stretch => CrossPlacement::Stretch,
                VerticalAlignment::Center => CrossPlacement::Align(StackAlignment::Center),
                VerticalAlignment::Bottom => CrossPlacement::Align(StackAlignment::End),
                VerticalAlignment::Top => CrossPlacement::Align(self.vertical_alignment),
            },
            Orientation::Vertical => match horizontal {
                HorizontalAlignment::Stretch => CrossPlacement::Stretch,
                HorizontalAlignment::Center => CrossPlacement::Align(StackAlignment::Center),
                HorizontalAlignment::Right => CrossPlacement::Align(StackAlignment::End),
                HorizontalAlignment::Left => CrossPlacement::Align(self.horizontal_alignment),
            },
        }
    }

    /// Snapshot the layout-relevant state of every participating child.
    fn collect(&self, tree: &WidgetTree, children: &[WidgetId], available: Size) -> Vec<StackItem> {
        children
            .iter()
            .filter_map(|&id| {
                let node = tree.layout_child(id)?;
                Some(StackItem {
                    id,
                    desired: tree.measure(id, available),
                    margin: node.margin(),
                    min: node.min_size(),
                    max: node.max_size(),
                    cross: self.cross_placement(node.horizontal_alignment(), node.vertical_alignment()),
                })
            })
            .collect()
    }

    /// Main-axis extent of `items` including margins and inner spacing.
    fn run_length(&self, items: &[StackItem]) -> f32 {
        if items.is_empty() {
            return 0.0;
        }
        let content: f32 = items
            .iter()
            .map(|item| self.orientation.main(item.desired) + self.orientation.main_spacing(&item.margin).1)
            .sum();
        content + self.base.spacing * (items.len() - 1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CrossPlacement {
    Stretch,
    Align(StackAlignment),
}

#[derive(Debug, Clone, Copy)]
struct StackItem {
    id: WidgetId,
    desired: Size,
    margin: Spacing,
    min: Size,
    max: Size,
    cross: CrossPlacement,
}

impl Layout for StackLayout {
    fn measure_desired_size(&self, tree: &WidgetTree, children: &[WidgetId], available: Size) -> Size {
        let inner = self.base.available_size(available);
        let items = self.collect(tree, children, inner);
        if items.is_empty() {
            return Size::ZERO;
        }

        let main = self.run_length(&items);
        let cross = items
            .iter()
            .map(|item| self.orientation.cross(item.desired) + self.orientation.cross_spacing(&item.margin).1)
            .fold(0.0_f32, f32::max);

        self.base.outer_size(self.orientation.size(main, cross))
    }

    fn arrange_children(&self, tree: &mut WidgetTree, children: &[WidgetId], final_rect: Rect) {
        let content = self.base.content_rect(final_rect);
        let items = self.collect(tree, children, content.size());
        let Some(last) = items.len().checked_sub(1) else {
            return;
        };

        let axis = self.orientation;
        let available_main = axis.main(content.size());
        let available_cross = axis.cross(content.size());

        // Main-axis size of the filling child, and where the run starts.
        let (fill_size, mut cursor) = if self.fill_last_child {
            let used = self.run_length(&items[..last]) + if last > 0 { self.base.spacing } else { 0.0 };
            let item = &items[last];
            let own_margin = axis.main_spacing(&item.margin).1;
            let size = (available_main - used - own_margin)
                .min(axis.main(item.max))
                .max(axis.main(item.min))
                .max(0.0);
            (Some(size), 0.0)
        } else {
            let used = self.run_length(&items);
            // A run longer than the content rect starts at the leading edge
            // and overflows past the trailing one, whatever the alignment.
            (None, self.main_alignment().offset(available_main, used).max(0.0))
        };

        for (index, item) in items.iter().enumerate() {
            let main_size = match fill_size {
                Some(size) if index == last => size,
                _ => axis.main(item.desired),
            };

            let (main_lead, main_margin) = axis.main_spacing(&item.margin);
            let (cross_lead, cross_margin) = axis.cross_spacing(&item.margin);
            let slot = (available_cross - cross_margin).max(0.0);

            let (cross_size, cross_offset) = match item.cross {
                CrossPlacement::Stretch => {
                    let size = slot.min(axis.cross(item.max)).max(axis.cross(item.min));
                    (size, 0.0)
                }
                CrossPlacement::Align(alignment) => {
                    let size = axis.cross(item.desired);
                    (size, alignment.offset(slot, size).max(0.0))
                }
            };

            let origin = axis.point(cursor + main_lead, cross_lead + cross_offset);
            let size = axis.size(main_size, cross_size);
            let rect = Rect::new(content.x + origin.x, content.y + origin.y, size.width, size.height);
            trace!(child = ?item.id, ?rect, "stack place");
            tree.arrange(item.id, rect);

            cursor += main_size + main_margin;
            if index < last {
                cursor += self.base.spacing;
            }
        }
    }

    fn base(&self) -> &LayoutBase {
        &self.base
    }

    fn name(&self) -> &'static str {
        "StackLayout"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
