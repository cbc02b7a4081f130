//! Trellis demo - headless showcase of the layout engine.
//!
//! Builds a small form (header, sidebar, content grid, footer), lays it out
//! at the configured client size and again after a resize, replays a few
//! input events, and prints the arranged tree.
//!
//! Usage: `trellis-demo [config.json]`. Set `RUST_LOG=trellis=debug` to see
//! the layout passes.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use trellis::{
    Button, Color, DisplayList, EstimatedTextMeasure, Font, GridLayout, GridPosition, Host, HostConfig,
    HorizontalAlignment, Key, KeyEvent, Label, Modifiers, MouseButton, MouseEvent, NamedKey, Panel, Point, Size, Spacing,
    StackAlignment, StackLayout, TextBox, VerticalAlignment, WidgetId, WidgetTree,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::load(&path).with_context(|| format!("loading host config from {path}"))?,
        None => HostConfig::default(),
    };
    tracing::info!(title = %config.title, "Starting trellis demo");

    let measure = EstimatedTextMeasure::new(config.text_char_width, config.text_line_height);
    let mut host = Host::new(config).context("creating host")?;
    let root = host.root();
    let form = build_form(host.tree_mut(), root).context("building widget tree")?;

    let submitted = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&submitted);
    host.tree_mut().on_click(form.submit, move |_| counter.set(counter.get() + 1));
    host.tree_mut().on_text_changed(form.name, |_, text| tracing::debug!(text, "name edited"));
    let counter = Rc::clone(&submitted);
    host.tree_mut().on_submit(form.name, move |_| counter.set(counter.get() + 1));
    host.dispatcher_mut().subscribe(|event, handled| {
        tracing::trace!(?event, handled, "event");
    });

    let mut list = DisplayList::with_measure(measure);
    host.render(&mut list);
    tracing::info!(commands = list.len(), "painted");
    println!("{}", host.tree().debug_tree(root));

    replay_input(&mut host, &form);
    tracing::info!(submitted = submitted.get(), "input replayed");
    if let Some(name) = host.tree().widget::<TextBox>(form.name) {
        println!("name field: {:?}", name.text());
    }

    host.resize(480.0, 360.0);
    println!("{}", host.tree().debug_tree(root));

    Ok(())
}

/// Ids the demo pokes at after building the tree.
struct Form {
    name: WidgetId,
    submit: WidgetId,
}

fn build_form(tree: &mut WidgetTree, root: WidgetId) -> Result<Form> {
    let mut grid = GridLayout::new();
    grid.add_fixed_row(40.0);
    grid.add_star_row(1.0);
    grid.add_auto_row();
    grid.add_auto_column();
    grid.add_star_column(1.0);
    tree.set_layout(root, grid);
    tree.set_background(root, Color::WHITE);

    // Header spans both columns.
    let header = tree.create(Label::new("Trellis").font(Font::new("sans-serif", 20.0).bold()));
    tree.set_margin(header, Spacing::symmetric(12.0, 6.0));
    tree.set_vertical_alignment(header, VerticalAlignment::Center);
    tree.add_child(root, header)?;
    GridLayout::set_grid_position(tree, header, GridPosition::new(0, 0).with_span(1, 2));

    // Sidebar: navigation buttons, last one fills.
    let sidebar = tree.create(Panel::new());
    tree.set_layout(sidebar, StackLayout::vertical().with_spacing(6.0).with_fill_last_child(true));
    tree.set_padding(sidebar, Spacing::all(8.0));
    tree.set_background(sidebar, Color::CONTROL);
    tree.set_vertical_alignment(sidebar, VerticalAlignment::Stretch);
    tree.add_child(root, sidebar)?;
    GridLayout::set_grid_position(tree, sidebar, GridPosition::new(1, 0));
    for text in ["Profile", "Settings", "About"] {
        let button = tree.create(Button::new(text).corner_radius(4.0));
        tree.set_horizontal_alignment(button, HorizontalAlignment::Stretch);
        tree.add_child(sidebar, button)?;
    }
    let spacer = tree.create(Panel::new());
    tree.add_child(sidebar, spacer)?;

    // Content: label/field pairs.
    let content = tree.create(Panel::new());
    let mut fields = GridLayout::new();
    fields.add_auto_column();
    fields.add_star_column(1.0);
    tree.set_padding(content, Spacing::all(12.0));
    tree.set_horizontal_alignment(content, HorizontalAlignment::Stretch);
    tree.set_vertical_alignment(content, VerticalAlignment::Stretch);
    tree.add_child(root, content)?;
    GridLayout::set_grid_position(tree, content, GridPosition::new(1, 1));

    let mut name = None;
    for (row, caption) in ["Name", "Email", "Password"].into_iter().enumerate() {
        fields.add_auto_row();

        let label = tree.create(Label::new(caption));
        tree.set_margin(label, Spacing::new(0.0, 4.0, 8.0, 4.0));
        tree.set_vertical_alignment(label, VerticalAlignment::Center);
        tree.add_child(content, label)?;
        GridLayout::set_grid_position(tree, label, GridPosition::new(row, 0));

        let field = tree.create(
            TextBox::new()
                .placeholder(caption.to_lowercase())
                .password(caption == "Password")
                .with_max_length(64),
        );
        tree.set_margin(field, Spacing::symmetric(0.0, 4.0));
        tree.set_padding(field, Spacing::symmetric(4.0, 2.0));
        tree.set_horizontal_alignment(field, HorizontalAlignment::Stretch);
        tree.set_border(field, Color::BORDER, 1.0);
        tree.add_child(content, field)?;
        GridLayout::set_grid_position(tree, field, GridPosition::new(row, 1));
        name.get_or_insert(field);
    }
    tree.set_layout(content, fields);

    // Footer: right-aligned action row.
    let footer = tree.create(Panel::new());
    tree.set_layout(
        footer,
        StackLayout::horizontal()
            .with_spacing(8.0)
            .with_horizontal_alignment(StackAlignment::End)
            .with_padding(Spacing::all(8.0)),
    );
    tree.set_horizontal_alignment(footer, HorizontalAlignment::Stretch);
    tree.add_child(root, footer)?;
    GridLayout::set_grid_position(tree, footer, GridPosition::new(2, 0).with_span(1, 2));

    let cancel = tree.create(Button::new("Cancel"));
    tree.add_child(footer, cancel)?;
    let submit = tree.create(Button::new("Submit"));
    tree.set_min_size(submit, Size::new(90.0, 0.0));
    tree.add_child(footer, submit)?;
    tree.set_name(submit, "submit");

    let name = name.context("form has no fields")?;
    Ok(Form { name, submit })
}

/// Click into the name field, type a word, confirm it with Enter, and press
/// Submit.
fn replay_input(host: &mut Host, form: &Form) {
    if let Some(center) = window_center(host.tree(), form.name) {
        click(host, center);
    }
    for ch in ["t", "r", "e", "l", "l", "i", "s"] {
        host.dispatch(
            KeyEvent::Pressed {
                key: Key::character(ch),
                modifiers: Modifiers::NONE,
                text: Some(ch.to_string()),
            }
            .into(),
        );
    }
    host.dispatch(
        KeyEvent::Pressed {
            key: Key::named(NamedKey::Enter),
            modifiers: Modifiers::NONE,
            text: None,
        }
        .into(),
    );
    if let Some(center) = window_center(host.tree(), form.submit) {
        click(host, center);
    }
}

fn window_center(tree: &WidgetTree, id: WidgetId) -> Option<Point> {
    let bounds = tree.bounds(id)?;
    let local_center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
    Some(tree.local_to_global(id, local_center))
}

fn click(host: &mut Host, position: Point) {
    let button = MouseButton::Left;
    host.dispatch(MouseEvent::ButtonPressed { button, position }.into());
    host.dispatch(MouseEvent::ButtonReleased { button, position }.into());
}
