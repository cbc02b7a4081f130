//! GridLayout - rows and columns of fixed, auto and star tracks.
//!
//! Each child occupies the cell named by its [`GridPosition`], stored on its
//! tree node. Track sizes come from [`resolve_tracks`]; each child is then
//! inset by its margin and aligned inside its cell.

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::base::{Layout, LayoutBase, apply_alignment};
use super::tracks::{TrackRequest, TrackResolution, resolve_tracks};
use crate::primitives::{Rect, Size, Spacing, non_negative};
use crate::tree::{WidgetId, WidgetTree};

// =========================================================================
// Track definitions
// =========================================================================

/// Sizing mode of a row or column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GridLength {
    /// Sized to the largest cell it holds.
    #[default]
    Auto,
    /// Literal extent in pixels.
    Fixed(f32),
    /// Weighted share of the space left after fixed and auto tracks.
    Star(f32),
}

/// A row or column definition with optional min/max limits.
///
/// Limits apply to every kind of track. Star tracks never shrink below
/// `min_size` even when the available space runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDefinition {
    pub length: GridLength,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for GridDefinition {
    fn default() -> Self {
        Self::AUTO
    }
}

impl GridDefinition {
    pub const AUTO: Self = Self {
        length: GridLength::Auto,
        min_size: 0.0,
        max_size: f32::INFINITY,
    };

    pub fn auto() -> Self {
        Self::AUTO
    }

    pub fn fixed(size: f32) -> Self {
        Self {
            length: GridLength::Fixed(non_negative(size)),
            ..Self::AUTO
        }
    }

    pub fn star(weight: f32) -> Self {
        Self {
            length: GridLength::Star(non_negative(weight)),
            ..Self::AUTO
        }
    }

    /// Bound the resolved size. A max below min is raised to min.
    pub fn with_limits(mut self, min: f32, max: f32) -> Self {
        self.min_size = non_negative(min);
        self.max_size = if max.is_nan() { f32::INFINITY } else { max.max(self.min_size) };
        self
    }

    pub fn is_auto(&self) -> bool {
        matches!(self.length, GridLength::Auto)
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.length, GridLength::Fixed(_))
    }

    pub fn is_star(&self) -> bool {
        matches!(self.length, GridLength::Star(_))
    }

    /// Star weight, zero for other kinds.
    pub fn star_value(&self) -> f32 {
        match self.length {
            GridLength::Star(weight) => weight,
            _ => 0.0,
        }
    }

    /// Literal size, zero for other kinds.
    pub fn fixed_size(&self) -> f32 {
        match self.length {
            GridLength::Fixed(size) => size,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn clamp(&self, size: f32) -> f32 {
        size.min(self.max_size).max(self.min_size)
    }
}

/// Fallback when no tracks are configured on an axis.
const DEFAULT_TRACKS: [GridDefinition; 1] = [GridDefinition::AUTO];

// =========================================================================
// GridPosition
// =========================================================================

/// The cell a child occupies. Spans are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl Default for GridPosition {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            row_span: 1,
            column_span: 1,
        }
    }
}

impl GridPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    pub fn with_span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.column_span = column_span.max(1);
        self
    }

    /// Fit this position into a `rows` x `columns` grid: indices past the
    /// end move to the last track and spans are cut at the edge.
    pub fn clamped(self, rows: usize, columns: usize) -> Self {
        let (row, row_span) = clamp_axis(self.row, self.row_span, rows);
        let (column, column_span) = clamp_axis(self.column, self.column_span, columns);
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }
}

fn clamp_axis(start: usize, span: usize, count: usize) -> (usize, usize) {
    let count = count.max(1);
    let start = start.min(count - 1);
    let span = span.clamp(1, count - start);
    (start, span)
}

// =========================================================================
// GridLayout
// =========================================================================

/// Two-dimensional arrangement.
///
/// An axis without definitions behaves as a single auto track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    base: LayoutBase,
    rows: Vec<GridDefinition>,
    columns: Vec<GridDefinition>,
}

/// A child's cell and its desired size with and without margin.
#[derive(Debug, Clone, Copy)]
struct CellInfo {
    id: WidgetId,
    position: GridPosition,
    desired: Size,
    outer: Size,
    margin: Spacing,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// A grid of `rows` x `columns` auto tracks (each at least 1).
    pub fn with_size(rows: usize, columns: usize) -> Self {
        let mut grid = Self::new();
        grid.set_row_count(rows);
        grid.set_column_count(columns);
        grid
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.base.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.base.padding = padding;
        self
    }

    // =====================================================================
    // Structure
    // =====================================================================

    /// Resize to `count` rows (at least 1); new rows are auto.
    pub fn set_row_count(&mut self, count: usize) {
        self.rows.resize(count.max(1), GridDefinition::AUTO);
    }

    pub fn set_column_count(&mut self, count: usize) {
        self.columns.resize(count.max(1), GridDefinition::AUTO);
    }

    pub fn row_count(&self) -> usize {
        self.row_tracks().len()
    }

    pub fn column_count(&self) -> usize {
        self.column_tracks().len()
    }

    /// Grow to at least `rows` x `columns`; never shrinks.
    pub fn ensure_grid_size(&mut self, rows: usize, columns: usize) {
        if self.rows.len() < rows {
            self.set_row_count(rows);
        }
        if self.columns.len() < columns {
            self.set_column_count(columns);
        }
    }

    /// Replace an existing row's definition. Out-of-range indices are ignored.
    pub fn set_row_definition(&mut self, row: usize, definition: GridDefinition) {
        if row >= self.row_count() {
            warn!(row, rows = self.row_count(), "row definition out of range ignored");
            return;
        }
        self.ensure_grid_size(row + 1, 0);
        self.rows[row] = definition;
    }

    pub fn set_column_definition(&mut self, column: usize, definition: GridDefinition) {
        if column >= self.column_count() {
            warn!(column, columns = self.column_count(), "column definition out of range ignored");
            return;
        }
        self.ensure_grid_size(0, column + 1);
        self.columns[column] = definition;
    }

    pub fn row_definition(&self, row: usize) -> Option<&GridDefinition> {
        self.row_tracks().get(row)
    }

    pub fn column_definition(&self, column: usize) -> Option<&GridDefinition> {
        self.column_tracks().get(column)
    }

    pub fn add_row(&mut self, definition: GridDefinition) {
        self.rows.push(definition);
    }

    pub fn add_column(&mut self, definition: GridDefinition) {
        self.columns.push(definition);
    }

    pub fn add_auto_row(&mut self) {
        self.add_row(GridDefinition::auto());
    }

    pub fn add_fixed_row(&mut self, height: f32) {
        self.add_row(GridDefinition::fixed(height));
    }

    pub fn add_star_row(&mut self, weight: f32) {
        self.add_row(GridDefinition::star(weight));
    }

    pub fn add_auto_column(&mut self) {
        self.add_column(GridDefinition::auto());
    }

    pub fn add_fixed_column(&mut self, width: f32) {
        self.add_column(GridDefinition::fixed(width));
    }

    pub fn add_star_column(&mut self, weight: f32) {
        self.add_column(GridDefinition::star(weight));
    }

    fn row_tracks(&self) -> &[GridDefinition] {
        if self.rows.is_empty() { &DEFAULT_TRACKS } else { &self.rows }
    }

    fn column_tracks(&self) -> &[GridDefinition] {
        if self.columns.is_empty() { &DEFAULT_TRACKS } else { &self.columns }
    }

    // =====================================================================
    // Child positions
    // =====================================================================

    /// Place `id` at `position`. Kept on the node until it is detached.
    pub fn set_grid_position(tree: &mut WidgetTree, id: WidgetId, position: GridPosition) {
        tree.set_grid_position(id, position);
    }

    /// The cell `id` occupies, `(0, 0, 1, 1)` when none was set.
    pub fn grid_position(tree: &WidgetTree, id: WidgetId) -> GridPosition {
        tree.grid_position(id)
    }

    // =====================================================================
    // Sizing
    // =====================================================================

    fn collect(&self, tree: &WidgetTree, children: &[WidgetId], available: Size) -> Vec<CellInfo> {
        let (rows, columns) = (self.row_count(), self.column_count());
        children
            .iter()
            .filter_map(|&id| {
                let node = tree.layout_child(id)?;
                let requested = tree.grid_position(id);
                let position = requested.clamped(rows, columns);
                if position != requested {
                    warn!(child = ?id, ?requested, ?position, "grid position out of range clamped");
                }
                let desired = tree.measure(id, available);
                let margin = node.margin();
                Some(CellInfo {
                    id,
                    position,
                    desired,
                    outer: desired.inflate(&margin),
                    margin,
                })
            })
            .collect()
    }

    fn resolve(&self, cells: &[CellInfo], available: Size) -> (TrackResolution, TrackResolution) {
        let row_requests: Vec<TrackRequest> = cells
            .iter()
            .map(|cell| TrackRequest {
                start: cell.position.row,
                span: cell.position.row_span,
                desired: cell.outer.height,
            })
            .collect();
        let column_requests: Vec<TrackRequest> = cells
            .iter()
            .map(|cell| TrackRequest {
                start: cell.position.column,
                span: cell.position.column_span,
                desired: cell.outer.width,
            })
            .collect();

        let rows = resolve_tracks(self.row_tracks(), &row_requests, available.height);
        let columns = resolve_tracks(self.column_tracks(), &column_requests, available.width);
        (rows, columns)
    }

    /// Resolved row heights and column widths for `available`, as the
    /// arrange pass would compute them.
    pub fn track_sizes(&self, tree: &WidgetTree, children: &[WidgetId], available: Size) -> (Vec<f32>, Vec<f32>) {
        let inner = self.base.available_size(available);
        let cells = self.collect(tree, children, inner);
        let (rows, columns) = self.resolve(&cells, inner);
        (rows.sizes, columns.sizes)
    }
}

impl Layout for GridLayout {
    fn measure_desired_size(&self, tree: &WidgetTree, children: &[WidgetId], available: Size) -> Size {
        let inner = self.base.available_size(available);
        let cells = self.collect(tree, children, inner);
        if cells.is_empty() {
            return Size::ZERO;
        }

        let (rows, columns) = self.resolve(&cells, inner);
        self.base.outer_size(Size::new(columns.total(), rows.total()))
    }

    fn arrange_children(&self, tree: &mut WidgetTree, children: &[WidgetId], final_rect: Rect) {
        let content = self.base.content_rect(final_rect);
        let cells = self.collect(tree, children, content.size());
        if cells.is_empty() {
            return;
        }

        let (rows, columns) = self.resolve(&cells, content.size());
        let row_offsets = rows.offsets();
        let column_offsets = columns.offsets();

        for cell in &cells {
            let GridPosition {
                row,
                column,
                row_span,
                column_span,
            } = cell.position;

            let left = content.x + column_offsets[column];
            let right = content.x + column_offsets[column + column_span];
            let top = content.y + row_offsets[row];
            let bottom = content.y + row_offsets[row + row_span];
            let cell_rect = Rect::new(left, top, right - left, bottom - top).inset(&cell.margin);

            let Some(node) = tree.node(cell.id) else {
                continue;
            };
            let (min, max) = (node.min_size(), node.max_size());
            let (horizontal, vertical) = (node.horizontal_alignment(), node.vertical_alignment());

            let fitted = Size::new(
                cell.desired.width.min(cell_rect.width),
                cell.desired.height.min(cell_rect.height),
            )
            .clamp(min, max);
            let aligned = apply_alignment(cell_rect, fitted, horizontal, vertical);
            let size = aligned.size().clamp(min, max);
            let rect = Rect::new(aligned.x, aligned.y, size.width, size.height);

            trace!(child = ?cell.id, ?cell_rect, ?rect, "grid place");
            tree.arrange(cell.id, rect);
        }
    }

    fn base(&self) -> &LayoutBase {
        &self.base
    }

    fn name(&self) -> &'static str {
        "GridLayout"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{HorizontalAlignment, VerticalAlignment};
    use crate::widgets::Panel;

    fn grid(layout: GridLayout) -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.create(Panel::new());
        tree.set_layout(root, layout);
        (tree, root)
    }

    fn cell(tree: &mut WidgetTree, root: WidgetId, position: GridPosition, size: Size) -> WidgetId {
        let id = tree.create(Panel::new());
        tree.set_min_size(id, size);
        tree.add_child(root, id).unwrap();
        GridLayout::set_grid_position(tree, id, position);
        id
    }

    fn stretch(tree: &mut WidgetTree, id: WidgetId) {
        tree.set_horizontal_alignment(id, HorizontalAlignment::Stretch);
        tree.set_vertical_alignment(id, VerticalAlignment::Stretch);
    }

    // =====================================================================
    // Structure
    // =====================================================================

    #[test]
    fn test_unconfigured_grid_is_one_auto_cell() {
        let grid = GridLayout::new();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_count(), 1);
        assert_eq!(grid.row_definition(0), Some(&GridDefinition::AUTO));
        assert_eq!(grid.row_definition(1), None);
    }

    #[test]
    fn test_add_tracks_replace_default() {
        let mut grid = GridLayout::new();
        grid.add_star_row(1.0);
        grid.add_fixed_row(20.0);
        grid.add_auto_column();
        assert_eq!(grid.row_count(), 2);
        assert!(grid.row_definition(0).unwrap().is_star());
        assert_eq!(grid.row_definition(1).unwrap().fixed_size(), 20.0);
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn test_set_count_clamps_to_one() {
        let mut grid = GridLayout::with_size(3, 2);
        assert_eq!((grid.row_count(), grid.column_count()), (3, 2));
        grid.set_row_count(0);
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn test_ensure_grid_size_never_shrinks() {
        let mut grid = GridLayout::with_size(4, 4);
        grid.ensure_grid_size(2, 6);
        assert_eq!((grid.row_count(), grid.column_count()), (4, 6));
    }

    #[test]
    fn test_set_definition_out_of_range_is_ignored() {
        let mut grid = GridLayout::with_size(2, 2);
        grid.set_row_definition(5, GridDefinition::fixed(10.0));
        assert_eq!(grid.row_count(), 2);

        let mut fresh = GridLayout::new();
        fresh.set_column_definition(0, GridDefinition::star(2.0));
        assert_eq!(fresh.column_definition(0).unwrap().star_value(), 2.0);
    }

    #[test]
    fn test_definition_limits() {
        let def = GridDefinition::fixed(50.0).with_limits(10.0, 30.0);
        assert_eq!(def.clamp(50.0), 30.0);
        assert_eq!(def.clamp(5.0), 10.0);

        let inverted = GridDefinition::auto().with_limits(20.0, 5.0);
        assert_eq!(inverted.max_size, 20.0);
    }

    #[test]
    fn test_position_clamped_into_grid() {
        let position = GridPosition::new(7, 1).with_span(3, 5);
        assert_eq!(position.clamped(3, 3), GridPosition::new(2, 1).with_span(1, 2));
        assert_eq!(GridPosition::default().with_span(0, 0), GridPosition::default());
    }

    // =====================================================================
    // Sizing
    // =====================================================================

    #[test]
    fn test_measure_auto_grid() {
        let mut layout = GridLayout::new();
        layout.add_auto_row();
        layout.add_auto_row();
        layout.add_auto_column();
        layout.add_fixed_column(40.0);
        let (mut tree, root) = grid(layout);

        cell(&mut tree, root, GridPosition::new(0, 0), Size::new(30.0, 10.0));
        let b = cell(&mut tree, root, GridPosition::new(1, 0), Size::new(20.0, 15.0));
        tree.set_margin(b, Spacing::all(5.0));

        // columns: max(30, 30) + 40; rows: 10 + 25
        assert_eq!(tree.measure(root, Size::new(500.0, 500.0)), Size::new(70.0, 35.0));
    }

    #[test]
    fn test_measure_empty_is_zero() {
        let (tree, root) = grid(GridLayout::with_size(2, 2));
        assert_eq!(tree.measure(root, Size::new(100.0, 100.0)), Size::ZERO);
    }

    #[test]
    fn test_star_tracks_fill_available() {
        let mut layout = GridLayout::new();
        layout.add_star_row(1.0);
        layout.add_star_row(2.0);
        let (mut tree, root) = grid(layout);
        let a = cell(&mut tree, root, GridPosition::new(0, 0), Size::ZERO);
        let children = tree.children(root).to_vec();

        let layout = tree.layout_as::<GridLayout>(root).unwrap();
        let (rows, _) = layout.track_sizes(&tree, &children, Size::new(100.0, 90.0));
        assert_eq!(rows, vec![30.0, 60.0]);
        assert!(tree.contains(a));
    }

    // =====================================================================
    // Arrange
    // =====================================================================

    #[test]
    fn test_arrange_aligns_within_cell() {
        let mut layout = GridLayout::new();
        layout.add_fixed_row(50.0);
        layout.add_fixed_column(100.0);
        layout.add_fixed_column(100.0);
        let (mut tree, root) = grid(layout);

        let centered = cell(&mut tree, root, GridPosition::new(0, 1), Size::new(20.0, 10.0));
        tree.set_horizontal_alignment(centered, HorizontalAlignment::Center);
        tree.set_vertical_alignment(centered, VerticalAlignment::Bottom);

        let filled = cell(&mut tree, root, GridPosition::new(0, 0), Size::new(20.0, 10.0));
        stretch(&mut tree, filled);
        tree.set_margin(filled, Spacing::all(5.0));

        tree.arrange(root, Rect::new(0.0, 0.0, 200.0, 50.0));
        assert_eq!(tree.bounds(centered), Some(Rect::new(140.0, 40.0, 20.0, 10.0)));
        assert_eq!(tree.bounds(filled), Some(Rect::new(5.0, 5.0, 90.0, 40.0)));
    }

    #[test]
    fn test_spanning_child_covers_tracks() {
        let mut layout = GridLayout::new();
        layout.add_fixed_row(10.0);
        layout.add_fixed_row(20.0);
        layout.add_fixed_column(30.0);
        let (mut tree, root) = grid(layout);

        let tall = cell(&mut tree, root, GridPosition::new(0, 0).with_span(2, 1), Size::ZERO);
        stretch(&mut tree, tall);
        tree.arrange(root, Rect::new(0.0, 0.0, 30.0, 30.0));
        assert_eq!(tree.bounds(tall), Some(Rect::new(0.0, 0.0, 30.0, 30.0)));
    }

    #[test]
    fn test_out_of_range_child_is_clamped_not_dropped() {
        let (mut tree, root) = grid(GridLayout::with_size(1, 1));
        let stray = cell(&mut tree, root, GridPosition::new(4, 4), Size::new(10.0, 10.0));
        tree.arrange(root, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(tree.bounds(stray), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_stretch_capped_by_max_size() {
        let mut layout = GridLayout::new();
        layout.add_star_row(1.0);
        layout.add_star_column(1.0);
        let (mut tree, root) = grid(layout);
        let capped = cell(&mut tree, root, GridPosition::default(), Size::ZERO);
        stretch(&mut tree, capped);
        tree.set_max_size(capped, Size::new(30.0, 1000.0));

        tree.arrange(root, Rect::new(0.0, 0.0, 100.0, 80.0));
        assert_eq!(tree.bounds(capped), Some(Rect::new(0.0, 0.0, 30.0, 80.0)));
    }

    #[test]
    fn test_layout_padding_offsets_cells() {
        let mut layout = GridLayout::new().with_padding(Spacing::all(10.0));
        layout.add_star_row(1.0);
        layout.add_star_column(1.0);
        let (mut tree, root) = grid(layout);
        let only = cell(&mut tree, root, GridPosition::default(), Size::ZERO);
        stretch(&mut tree, only);

        tree.arrange(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tree.bounds(only), Some(Rect::new(10.0, 10.0, 80.0, 80.0)));
    }
}
