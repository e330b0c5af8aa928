//! Shared UI components (status bar, modal dialogs).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, format_action};
use crate::app::{AppState, FormField, FormMode, InputMode, ItemForm};
use crate::error::Severity;

/// Render the bottom status bar: mode tag plus the last status message,
/// colored by severity.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "EDIT",
    };
    let icon = match app.status.severity {
        Severity::Info => "i",
        Severity::Success => "✓",
        Severity::Warning => "!",
        Severity::Error => "✗",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {mode} "),
            Style::default().fg(app.theme.status_bg).bg(app.theme.title),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{icon} {}", app.status.message),
            Style::default()
                .fg(app.theme.severity_color(app.status.severity))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let p = Paragraph::new(line).style(Style::default().bg(app.theme.status_bg));
    f.render_widget(p, area);
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn modal_block(app: &AppState, title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

/// Render the add/update form with the focused field marked.
pub fn render_form_modal(f: &mut Frame, area: Rect, app: &AppState, form: &ItemForm) {
    let rect = centered_rect(50, 10, area);
    let title = match form.mode {
        FormMode::Add => "Add Item",
        FormMode::Edit => "Update Item",
    };
    let field_line = |label: &str, value: &str, field: FormField| {
        let focused = form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let cursor = if focused { "_" } else { "" };
        let style = if focused {
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<10}"), style),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(app.theme.text)),
        ])
    };
    let lines = vec![
        field_line("Item Name", &form.name, FormField::Name),
        field_line("Quantity", &form.quantity, FormField::Quantity),
        field_line("Price", &form.price, FormField::Price),
        Line::raw(""),
        Line::from(Span::styled(
            "Tab/↑↓: switch field  Enter: save  Esc: cancel",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(lines).block(modal_block(app, title));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the delete confirmation dialog. `selected` 0 = Yes, 1 = No.
pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, selected: usize) {
    let rect = centered_rect(44, 7, area);
    let name = app.selected_item().map(|i| i.name().to_string()).unwrap_or_default();
    let option = |label: &str, idx: usize| {
        if idx == selected {
            Span::styled(
                format!("[{label}]"),
                Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(format!(" {label} "))
        }
    };
    let lines = vec![
        Line::raw(format!("Delete \"{name}\"?")),
        Line::raw(""),
        Line::from(vec![option("Yes", 0), Span::raw("   "), option("No", 1)]),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(modal_block(app, "Delete Item"));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the export destination prompt.
pub fn render_export_modal(f: &mut Frame, area: Rect, app: &AppState, path: &str) {
    let width = 60u16.min(area.width.saturating_sub(4)).max(30);
    let rect = centered_rect(width, 6, area);
    let lines = vec![
        Line::raw(format!("{path}_")),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter: export  Esc: cancel",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(lines).block(modal_block(app, "Export CSV to"));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help dialog listing the current keybindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(2)).max(8);
    let rect = centered_rect(width, height, area);

    let shown = [
        (KeyAction::AddItem, "Add item"),
        (KeyAction::EditItem, "Update selected item"),
        (KeyAction::DeleteItem, "Delete selected item"),
        (KeyAction::StartSearch, "Search"),
        (KeyAction::ClearSearch, "Clear search"),
        (KeyAction::Export, "Export CSV"),
        (KeyAction::ExportAs, "Export CSV to..."),
        (KeyAction::MoveUp, "Move up"),
        (KeyAction::MoveDown, "Move down"),
        (KeyAction::PageUp, "Page up"),
        (KeyAction::PageDown, "Page down"),
        (KeyAction::Top, "First item"),
        (KeyAction::Bottom, "Last item"),
        (KeyAction::OpenHelp, "Help"),
        (KeyAction::Quit, "Quit"),
    ];
    let mut lines = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (action, label) in shown {
        let keys = app.keymap.keys_for(action);
        let keys = if keys.is_empty() { "(unbound)".to_string() } else { keys.join(", ") };
        lines.push(Line::from(vec![
            Span::raw(format!("  {label:>22} │ ")),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("Rebind in keybinds.conf, e.g. {} = Ctrl+q", format_action(KeyAction::Quit)),
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(modal_block(app, "Help"));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
