pub mod components;
pub mod items;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(root[1]);

    render_header(f, root[0], app);
    items::render_items_table(f, body[0], app);
    items::render_item_details(f, body[1], app);
    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        let area = f.area();
        render_modal(f, area, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let query = app.view.query();
    let search = match app.input_mode {
        InputMode::Search => format!("Search: {query}_"),
        _ if !query.is_empty() => format!("Search: {query}"),
        _ => "/: search".to_string(),
    };
    let p = Paragraph::new(format!(
        "{search}   items:{}  shown:{}   a: add  e: edit  d: delete  x: export  ?: help  q: quit",
        app.inventory.len(),
        app.view.len()
    ))
    .block(
        Block::default()
            .title("Inventory Management")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::Form(form)) => components::render_form_modal(f, area, app, form),
        Some(ModalState::DeleteConfirm { selected }) => {
            components::render_delete_modal(f, area, app, *selected)
        }
        Some(ModalState::ExportPath { path }) => components::render_export_modal(f, area, app, path),
        Some(ModalState::Help) => components::render_help_modal(f, area, app),
        None => {}
    }
}
