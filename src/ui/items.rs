use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;

pub fn render_items_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let selected = app.selected.unwrap_or(0);
    let start = (selected / app.rows_per_page) * app.rows_per_page;
    let rows: Vec<Row> = app
        .view
        .rows(&app.inventory)
        .enumerate()
        .skip(start)
        .take(app.rows_per_page)
        .map(|(view_row, (_, item))| {
            let style = if Some(view_row) == app.selected {
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .bg(app.theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text)
            };
            Row::new(vec![
                Cell::from(item.name().to_string()),
                Cell::from(item.quantity_text()),
                Cell::from(item.price_text()),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Percentage(60), Constraint::Length(10), Constraint::Length(12)];
    let header = Row::new(vec!["Item Name", "Quantity", "Price"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if app.view.query().is_empty() {
        format!("Items ({})", app.inventory.len())
    } else {
        format!("Items ({} of {})", app.view.len(), app.inventory.len())
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_item_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match (app.selected_index(), app.selected_item()) {
        (Some(index), Some(item)) => format!(
            "Name: {}\nQuantity: {}\nPrice: {}\nStock value: {:.2}\nRow: {} of {}",
            item.name(),
            item.quantity_text(),
            item.price_text(),
            f64::from(item.quantity()) * item.price(),
            index + 1,
            app.inventory.len()
        ),
        _ if app.inventory.is_empty() => "No items yet. Press 'a' to add one.".to_string(),
        _ => "No item selected".to_string(),
    };
    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}
