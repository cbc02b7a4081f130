//! Widget tree.
//!
//! All nodes live in a slotmap arena keyed by [`WidgetId`]. A parent owns its
//! children through an ordered `Vec<WidgetId>` (insertion order is z-order
//! and layout order); a child points back at its parent with a plain id that
//! is only ever used for upward walks. Structural mutations that would give
//! a node two parents or close a cycle are rejected with [`TreeError`] and
//! leave the tree untouched.
//!
//! Detached nodes stay in the arena until [`WidgetTree::destroy`] removes
//! them together with their subtree. An id whose node is gone is skipped
//! wherever it turns up.
//!
//! The passes are split across submodules:
//! - `measure`: measure/arrange protocol
//! - `input`: hit testing, coordinate transforms, event propagation
//! - `paint`: render pass
//! - `scroll`: scrollable panel offsets

mod input;
mod measure;
mod paint;
mod scroll;

use std::fmt::{self, Write as _};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use tracing::{debug, warn};

use crate::error::TreeError;
use crate::event_context::{KeyEvent, MouseEvent};
use crate::layout::{GridPosition, HorizontalAlignment, Layout, VerticalAlignment};
use crate::primitives::{Color, Point, Rect, Size, Spacing};
use crate::render::{EstimatedTextMeasure, TextMeasure};
use crate::widget::{Chrome, Visibility, Widget, WidgetState};

new_key_type! {
    /// Handle into the widget arena. Stable across insertions/removals.
    pub struct WidgetId;
}

pub type ClickHandler = Box<dyn FnMut(WidgetId)>;
pub type MouseMoveHandler = Box<dyn FnMut(WidgetId, &MouseEvent)>;
pub type KeyPressHandler = Box<dyn FnMut(WidgetId, &KeyEvent)>;
pub type TextChangedHandler = Box<dyn FnMut(WidgetId, &str)>;
pub type SubmitHandler = Box<dyn FnMut(WidgetId)>;

#[derive(Default)]
pub(crate) struct Handlers {
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_mouse_move: Option<MouseMoveHandler>,
    pub(crate) on_key_press: Option<KeyPressHandler>,
    pub(crate) on_text_changed: Option<TextChangedHandler>,
    pub(crate) on_submit: Option<SubmitHandler>,
}

// =========================================================================
// WidgetNode
// =========================================================================

/// One node of the tree: the widget kind plus everything layout needs.
pub struct WidgetNode {
    pub(crate) kind: Box<dyn Widget>,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) layout: Option<Rc<dyn Layout>>,

    /// Last arranged rect, in the parent's coordinate space.
    pub(crate) bounds: Rect,
    /// Manual placement inside a layout-less container.
    pub(crate) position: Point,
    pub(crate) margin: Spacing,
    pub(crate) padding: Spacing,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,
    pub(crate) horizontal_alignment: HorizontalAlignment,
    pub(crate) vertical_alignment: VerticalAlignment,
    pub(crate) visibility: Visibility,
    pub(crate) grid_position: Option<GridPosition>,

    pub(crate) enabled: bool,
    pub(crate) focused: bool,
    pub(crate) hovered: bool,
    pub(crate) chrome: Chrome,
    pub(crate) name: Option<String>,

    pub(crate) layout_dirty: bool,
    pub(crate) paint_dirty: bool,
    pub(crate) handlers: Handlers,
}

impl WidgetNode {
    fn new(kind: Box<dyn Widget>) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            layout: None,
            bounds: Rect::ZERO,
            position: Point::ORIGIN,
            margin: Spacing::ZERO,
            padding: Spacing::ZERO,
            min_size: Size::ZERO,
            max_size: Size::MAX,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            visibility: Visibility::Visible,
            grid_position: None,
            enabled: true,
            focused: false,
            hovered: false,
            chrome: Chrome::none(),
            name: None,
            layout_dirty: true,
            paint_dirty: true,
            handlers: Handlers::default(),
        }
    }

    pub fn kind(&self) -> &dyn Widget {
        self.kind.as_ref()
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn layout(&self) -> Option<&Rc<dyn Layout>> {
        self.layout.as_ref()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn margin(&self) -> Spacing {
        self.margin
    }

    pub fn padding(&self) -> Spacing {
        self.padding
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn max_size(&self) -> Size {
        self.max_size
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    pub fn is_paint_dirty(&self) -> bool {
        self.paint_dirty
    }

    /// Painted and hit-tested.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub(crate) fn state(&self) -> WidgetState {
        WidgetState {
            bounds: self.bounds,
            padding: self.padding,
            enabled: self.enabled,
            focused: self.focused,
            hovered: self.hovered,
        }
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("kind", &self.kind.type_name())
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("layout", &self.layout.as_ref().map(|l| l.name()))
            .field("bounds", &self.bounds)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

// =========================================================================
// WidgetTree
// =========================================================================

/// Arena-backed retained widget tree.
pub struct WidgetTree {
    arena: SlotMap<WidgetId, WidgetNode>,
    text_measure: Rc<dyn TextMeasure>,
    focused: Option<WidgetId>,
    repaint: bool,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.arena.len())
            .field("focused", &self.focused)
            .field("repaint", &self.repaint)
            .finish()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::with_text_measure(Rc::new(EstimatedTextMeasure::default()))
    }

    pub fn with_text_measure(text_measure: Rc<dyn TextMeasure>) -> Self {
        Self {
            arena: SlotMap::with_key(),
            text_measure,
            focused: None,
            repaint: true,
        }
    }

    /// Text measurement used by leaf kinds. Invalidates every node's layout.
    pub fn set_text_measure(&mut self, text_measure: Rc<dyn TextMeasure>) {
        self.text_measure = text_measure;
        for node in self.arena.values_mut() {
            node.layout_dirty = true;
        }
        self.repaint = true;
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.text_measure.as_ref()
    }

    // ---------------------------------------------------------------------
    // Hierarchy
    // ---------------------------------------------------------------------

    /// Insert a detached widget.
    pub fn create(&mut self, kind: impl Widget) -> WidgetId {
        self.create_boxed(Box::new(kind))
    }

    pub fn create_boxed(&mut self, kind: Box<dyn Widget>) -> WidgetId {
        self.arena.insert(WidgetNode::new(kind))
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.arena.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.arena.get_mut(id)
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Rejected (tree unchanged) when either id is unknown, the child already
    /// has a parent, or the child is `parent` itself or one of its ancestors.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        if !self.arena.contains_key(parent) {
            return Err(TreeError::UnknownWidget(parent));
        }
        let Some(node) = self.arena.get(child) else {
            return Err(TreeError::UnknownWidget(child));
        };
        if let Some(existing) = node.parent {
            warn!(?child, ?existing, "add_child rejected: widget already has a parent");
            return Err(TreeError::AlreadyParented { child, parent: existing });
        }
        if parent == child || self.is_ancestor(child, parent) {
            warn!(?parent, ?child, "add_child rejected: would create a cycle");
            return Err(TreeError::WouldCycle { parent, child });
        }

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        self.invalidate_layout(parent);
        self.invalidate(parent);
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// The detached subtree stays in the arena: attach it elsewhere or
    /// [`destroy`](Self::destroy) it, otherwise it lives as long as the tree.
    /// Returns false if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        self.detach_node(child);
        self.invalidate_layout(parent);
        self.invalidate(parent);
        true
    }

    /// Detach every child of `parent`.
    ///
    /// Like [`remove_child`](Self::remove_child), the detached subtrees stay
    /// in the arena until re-attached or destroyed. Use
    /// [`destroy_children`](Self::destroy_children) to drop them.
    pub fn remove_all_children(&mut self, parent: WidgetId) {
        let Some(node) = self.arena.get_mut(parent) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        if children.is_empty() {
            return;
        }
        for child in children {
            self.detach_node(child);
        }
        self.invalidate_layout(parent);
        self.invalidate(parent);
    }

    /// Destroy every child of `parent` together with their subtrees.
    pub fn destroy_children(&mut self, parent: WidgetId) {
        let children = self.children(parent).to_vec();
        for child in children {
            self.destroy(child);
        }
    }

    /// Remove a widget and all its descendants from the arena.
    pub fn destroy(&mut self, id: WidgetId) -> bool {
        if !self.arena.contains_key(id) {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }

        let mut to_remove = Vec::new();
        self.collect_subtree(id, &mut to_remove);
        if self.focused.is_some_and(|f| to_remove.contains(&f)) {
            self.focused = None;
        }
        for rid in &to_remove {
            self.arena.remove(*rid);
        }
        debug!(?id, removed = to_remove.len(), "destroyed subtree");
        true
    }

    fn detach_node(&mut self, child: WidgetId) {
        let mut subtree = Vec::new();
        self.collect_subtree(child, &mut subtree);
        if let Some(focused) = self.focused
            && subtree.contains(&focused)
        {
            self.set_focus(None);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
            node.grid_position = None;
            node.hovered = false;
            node.layout_dirty = true;
        }
    }

    fn collect_subtree(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        out.push(id);
        if let Some(node) = self.arena.get(id) {
            for &child in &node.children {
                self.collect_subtree(child, out);
            }
        }
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    /// Children in insertion (z) order. Empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.arena.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Walk from the parent of `id` up to the root.
    pub fn ancestors(&self, id: WidgetId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Number of ancestors. A root has depth 0.
    pub fn depth(&self, id: WidgetId) -> usize {
        self.ancestors(id).count()
    }

    /// Whether `ancestor` lies on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    // ---------------------------------------------------------------------
    // Layout properties
    // ---------------------------------------------------------------------

    fn update_node(&mut self, id: WidgetId, affects_layout: bool, f: impl FnOnce(&mut WidgetNode)) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        f(node);
        if affects_layout {
            self.invalidate_layout(id);
        }
        self.invalidate(id);
    }

    pub fn set_layout(&mut self, id: WidgetId, layout: impl Layout + 'static) {
        self.set_shared_layout(id, Rc::new(layout));
    }

    pub fn set_shared_layout(&mut self, id: WidgetId, layout: Rc<dyn Layout>) {
        self.update_node(id, true, |n| n.layout = Some(layout));
    }

    pub fn clear_layout(&mut self, id: WidgetId) {
        self.update_node(id, true, |n| n.layout = None);
    }

    pub fn layout(&self, id: WidgetId) -> Option<Rc<dyn Layout>> {
        self.arena.get(id).and_then(|n| n.layout.clone())
    }

    /// Typed access to the attached layout strategy.
    pub fn layout_as<L: Layout + 'static>(&self, id: WidgetId) -> Option<&L> {
        self.arena
            .get(id)
            .and_then(|n| n.layout.as_deref())
            .and_then(|l| l.as_any().downcast_ref::<L>())
    }

    pub fn set_margin(&mut self, id: WidgetId, margin: Spacing) {
        self.update_node(id, true, |n| n.margin = margin);
    }

    pub fn set_padding(&mut self, id: WidgetId, padding: Spacing) {
        self.update_node(id, true, |n| n.padding = padding);
    }

    pub fn set_min_size(&mut self, id: WidgetId, size: Size) {
        self.update_node(id, true, |n| n.min_size = size.sanitized());
    }

    pub fn set_max_size(&mut self, id: WidgetId, size: Size) {
        self.update_node(id, true, |n| n.max_size = size.sanitized());
    }

    /// Pin both min and max to `size`.
    pub fn set_fixed_size(&mut self, id: WidgetId, size: Size) {
        let size = size.sanitized();
        self.update_node(id, true, |n| {
            n.min_size = size;
            n.max_size = size;
        });
    }

    pub fn set_horizontal_alignment(&mut self, id: WidgetId, alignment: HorizontalAlignment) {
        self.update_node(id, true, |n| n.horizontal_alignment = alignment);
    }

    pub fn set_vertical_alignment(&mut self, id: WidgetId, alignment: VerticalAlignment) {
        self.update_node(id, true, |n| n.vertical_alignment = alignment);
    }

    /// Manual placement used by containers without a layout.
    pub fn set_position(&mut self, id: WidgetId, position: Point) {
        self.update_node(id, true, |n| n.position = position);
    }

    /// Switching to or from `Collapsed` changes layout; Visible/Hidden only paint.
    pub fn set_visibility(&mut self, id: WidgetId, visibility: Visibility) {
        let Some(current) = self.arena.get(id).map(|n| n.visibility) else {
            return;
        };
        if current == visibility {
            return;
        }
        let affects_layout = current == Visibility::Collapsed || visibility == Visibility::Collapsed;
        if visibility != Visibility::Visible
            && let Some(focused) = self.focused
            && (focused == id || self.is_ancestor(id, focused))
        {
            self.set_focus(None);
        }
        self.update_node(id, affects_layout, |n| {
            n.visibility = visibility;
            if visibility != Visibility::Visible {
                n.hovered = false;
            }
        });
    }

    pub fn set_grid_position(&mut self, id: WidgetId, position: GridPosition) {
        self.update_node(id, true, |n| n.grid_position = Some(position));
    }

    /// Grid cell of a widget; `(0, 0, 1, 1)` when never set.
    pub fn grid_position(&self, id: WidgetId) -> GridPosition {
        self.arena
            .get(id)
            .and_then(|n| n.grid_position)
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------------
    // Paint-only properties
    // ---------------------------------------------------------------------

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        self.update_node(id, false, |n| n.enabled = enabled);
    }

    pub fn set_chrome(&mut self, id: WidgetId, chrome: Chrome) {
        self.update_node(id, false, |n| n.chrome = chrome);
    }

    pub fn set_background(&mut self, id: WidgetId, color: Color) {
        self.update_node(id, false, |n| n.chrome.background = Some(color));
    }

    pub fn set_border(&mut self, id: WidgetId, color: Color, width: f32) {
        self.update_node(id, false, |n| {
            n.chrome.border_color = Some(color);
            n.chrome.border_width = width.max(0.0);
        });
    }

    pub fn set_corner_radius(&mut self, id: WidgetId, radius: f32) {
        self.update_node(id, false, |n| n.chrome.corner_radius = radius.max(0.0));
    }

    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.name = Some(name.into());
        }
    }

    /// First widget in the arena carrying `name`.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.arena
            .iter()
            .find(|(_, n)| n.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.arena.get(id).map(|n| n.bounds)
    }

    // ---------------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------------

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Move keyboard focus, notifying the kinds that lose and gain it.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        let id = id.filter(|id| self.arena.contains_key(*id));
        if self.focused == id {
            return;
        }
        if let Some(previous) = self.focused.take()
            && let Some(node) = self.arena.get_mut(previous)
        {
            node.focused = false;
            node.kind.on_focus_changed(false);
            self.invalidate(previous);
        }
        if let Some(next) = id
            && let Some(node) = self.arena.get_mut(next)
        {
            node.focused = true;
            node.kind.on_focus_changed(true);
            self.focused = Some(next);
            self.invalidate(next);
        }
    }

    // ---------------------------------------------------------------------
    // Callbacks
    // ---------------------------------------------------------------------

    pub fn on_click(&mut self, id: WidgetId, handler: impl FnMut(WidgetId) + 'static) {
        if let Some(node) = self.arena.get_mut(id) {
            node.handlers.on_click = Some(Box::new(handler));
        }
    }

    pub fn on_mouse_move(&mut self, id: WidgetId, handler: impl FnMut(WidgetId, &MouseEvent) + 'static) {
        if let Some(node) = self.arena.get_mut(id) {
            node.handlers.on_mouse_move = Some(Box::new(handler));
        }
    }

    pub fn on_key_press(&mut self, id: WidgetId, handler: impl FnMut(WidgetId, &KeyEvent) + 'static) {
        if let Some(node) = self.arena.get_mut(id) {
            node.handlers.on_key_press = Some(Box::new(handler));
        }
    }

    /// Fires after input edits a text widget's content, with the new text.
    /// Programmatic `set_text` does not fire it.
    pub fn on_text_changed(&mut self, id: WidgetId, handler: impl FnMut(WidgetId, &str) + 'static) {
        if let Some(node) = self.arena.get_mut(id) {
            node.handlers.on_text_changed = Some(Box::new(handler));
        }
    }

    /// Fires when a text widget is submitted with Enter.
    pub fn on_submit(&mut self, id: WidgetId, handler: impl FnMut(WidgetId) + 'static) {
        if let Some(node) = self.arena.get_mut(id) {
            node.handlers.on_submit = Some(Box::new(handler));
        }
    }

    // ---------------------------------------------------------------------
    // Typed kind access
    // ---------------------------------------------------------------------

    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.arena.get(id)?.kind.as_any().downcast_ref::<T>()
    }

    /// Mutable access without invalidation. Prefer [`Self::update_widget`].
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.arena.get_mut(id)?.kind.as_any_mut().downcast_mut::<T>()
    }

    /// Mutate the kind and invalidate layout and paint.
    ///
    /// Returns `None` if the id is unknown or the kind is not `T`.
    pub fn update_widget<T: Widget, R>(&mut self, id: WidgetId, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let kind = self.widget_mut::<T>(id)?;
        let result = f(kind);
        self.invalidate_layout(id);
        self.invalidate(id);
        Some(result)
    }

    // ---------------------------------------------------------------------
    // Invalidation
    // ---------------------------------------------------------------------

    /// Mark a widget's painted representation stale.
    pub fn invalidate(&mut self, id: WidgetId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.paint_dirty = true;
            self.repaint = true;
        }
    }

    /// Mark a widget and its ancestors as needing layout.
    pub fn invalidate_layout(&mut self, id: WidgetId) {
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.arena.get_mut(cid) else {
                break;
            };
            node.layout_dirty = true;
            current = node.parent;
        }
    }

    pub fn is_layout_dirty(&self, id: WidgetId) -> bool {
        self.arena.get(id).is_some_and(|n| n.layout_dirty)
    }

    /// Whether a layout pass from `root` would arrange any dirty node.
    ///
    /// Walks the nodes an arrange from `root` visits: collapsed children are
    /// skipped, and detached subtrees are never reached.
    pub fn needs_layout(&self, root: WidgetId) -> bool {
        let Some(node) = self.arena.get(root) else {
            return false;
        };
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            if node.layout_dirty {
                return true;
            }
            stack.extend(node.children.iter().filter_map(|&c| self.layout_child(c)));
        }
        false
    }

    pub fn needs_repaint(&self) -> bool {
        self.repaint
    }

    // ---------------------------------------------------------------------
    // Diagnostics
    // ---------------------------------------------------------------------

    /// Indented dump of a subtree with arranged bounds, one node per line.
    pub fn debug_tree(&self, id: WidgetId) -> String {
        let mut out = String::new();
        self.write_debug_tree(id, 0, &mut out);
        out
    }

    fn write_debug_tree(&self, id: WidgetId, depth: usize, out: &mut String) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let b = node.bounds;
        let _ = write!(out, "{:indent$}{}", "", node.kind.type_name(), indent = depth * 2);
        if let Some(name) = &node.name {
            let _ = write!(out, " \"{name}\"");
        }
        if let Some(layout) = &node.layout {
            let _ = write!(out, " <{}>", layout.name());
        }
        let _ = writeln!(out, " [{}, {} {}x{}]", b.x, b.y, b.width, b.height);
        for &child in &node.children {
            self.write_debug_tree(child, depth + 1, out);
        }
    }
}

/// Iterator over a widget's ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a WidgetTree,
    next: Option<WidgetId>,
}

impl Iterator for Ancestors<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<WidgetId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
