//! Host glue.
//!
//! The [`Host`] plays the window's part: it owns the widget tree and its
//! root, supplies the client size to the root's measure pass, arranges the
//! root into the client rect on resize, runs the paint pass, and forwards
//! input into the tree before fanning it out to application listeners.

use std::rc::Rc;

use tracing::debug;

use crate::config::HostConfig;
use crate::error::ConfigError;
use crate::event_context::{Event, EventDispatcher};
use crate::primitives::{Point, Rect, Size};
use crate::render::{EstimatedTextMeasure, Renderer};
use crate::tree::{WidgetId, WidgetTree};
use crate::widgets::Panel;

/// Owner of a widget tree bound to a client area.
pub struct Host {
    config: HostConfig,
    tree: WidgetTree,
    root: WidgetId,
    client: Size,
    dispatcher: EventDispatcher,
    layout_passes: u64,
}

impl Host {
    /// Build a host with an empty root [`Panel`] sized to the configured
    /// client area. Text is measured with the configured ratios.
    pub fn new(config: HostConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let measure = EstimatedTextMeasure::new(config.text_char_width, config.text_line_height);
        let mut tree = WidgetTree::with_text_measure(Rc::new(measure));
        let root = tree.create(Panel::new());
        tree.set_name(root, "root");

        let client = config.client_size();
        debug!(title = %config.title, ?client, "host created");
        Ok(Self {
            config,
            tree,
            root,
            client,
            dispatcher: EventDispatcher::new(),
            layout_passes: 0,
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn client_size(&self) -> Size {
        self.client
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Completed layout passes since creation.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// New client area: measure and arrange the root into `(0, 0, w, h)`.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.client = Size::new(width, height).sanitized();
        debug!(client = ?self.client, "resize");
        self.run_layout();
    }

    /// Run a layout pass if anything was invalidated since the last one.
    /// Returns whether a pass ran.
    pub fn update_layout(&mut self) -> bool {
        if self.layout_passes > 0 && !self.tree.needs_layout(self.root) {
            return false;
        }
        self.run_layout();
        true
    }

    fn run_layout(&mut self) {
        let desired = self.tree.measure(self.root, self.client);
        self.tree
            .arrange(self.root, Rect::from_origin_size(Point::ORIGIN, self.client));
        self.layout_passes += 1;
        debug!(pass = self.layout_passes, ?desired, client = ?self.client, "layout pass");

        if self.config.debug_layout {
            debug!("arranged tree:\n{}", self.tree.debug_tree(self.root));
        }
    }

    /// Bring layout up to date and paint the whole tree.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.update_layout();
        self.tree.render(self.root, renderer);
    }

    /// Forward an event (window coordinates) into the tree, then notify
    /// listeners. Returns whether a widget handled it.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let handled = match &event {
            Event::Mouse(mouse) => self.tree.mouse_event(self.root, mouse),
            Event::Keyboard(key) => self.tree.key_event(self.root, key),
        };
        self.dispatcher.dispatch(&event, handled);
        handled
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("title", &self.config.title)
            .field("client", &self.client)
            .field("widgets", &self.tree.len())
            .field("layout_passes", &self.layout_passes)
            .finish()
    }
}
