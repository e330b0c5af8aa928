use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, FormMode, InputMode, ItemForm, ModalState};
use crate::error::Severity;
use crate::ui;

/// Whether the event loop should keep going after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Draw, poll and dispatch until the user quits.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    app.view.refresh(&app.inventory);
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }
    tracing::info!(items = app.inventory.len(), "leaving event loop");
    Ok(())
}

/// Apply one key press to the state.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    // Text entry only takes plain characters; Ctrl+C quits from any mode
    if app.input_mode != InputMode::Normal && key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        if matches!(key.code, KeyCode::Char(_)) {
            return Flow::Continue;
        }
    }
    match app.input_mode {
        InputMode::Normal => {
            if let Some(action) = app.keymap.resolve(&key) {
                return handle_action(app, action);
            }
        }
        InputMode::Search => handle_search_key(app, key.code),
        InputMode::Modal => handle_modal_key(app, key.code),
    }
    Flow::Continue
}

fn handle_action(app: &mut AppState, action: KeyAction) -> Flow {
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Ignore => {}
        KeyAction::OpenHelp => open_modal(app, ModalState::Help),
        KeyAction::StartSearch => {
            app.input_mode = InputMode::Search;
            app.set_status(Severity::Info, "Type to filter; Enter keeps the filter, Esc clears it");
        }
        KeyAction::ClearSearch => {
            if !app.view.query().is_empty() {
                app.set_query("");
            }
        }
        KeyAction::AddItem => open_modal(app, ModalState::Form(ItemForm::empty(FormMode::Add))),
        KeyAction::EditItem => match app.selected_item().map(ItemForm::from_item) {
            Some(form) => open_modal(app, ModalState::Form(form)),
            None => app.set_status(Severity::Warning, "Select an item to update"),
        },
        KeyAction::DeleteItem => {
            if app.selected_item().is_some() {
                open_modal(app, ModalState::DeleteConfirm { selected: 1 });
            } else {
                app.set_status(Severity::Warning, "Select an item to delete");
            }
        }
        KeyAction::Export => {
            let _ = app.export_now();
        }
        KeyAction::ExportAs => {
            let path = app.export_path.to_string_lossy().into_owned();
            open_modal(app, ModalState::ExportPath { path });
        }
        KeyAction::MoveUp => move_selection(app, -1),
        KeyAction::MoveDown => move_selection(app, 1),
        KeyAction::PageUp => {
            let page = app.rows_per_page.max(1) as isize;
            move_selection(app, -page);
        }
        KeyAction::PageDown => {
            let page = app.rows_per_page.max(1) as isize;
            move_selection(app, page);
        }
        KeyAction::Top => move_selection(app, isize::MIN),
        KeyAction::Bottom => move_selection(app, isize::MAX),
    }
    Flow::Continue
}

fn move_selection(app: &mut AppState, delta: isize) {
    let len = app.view.len();
    if len == 0 {
        app.selected = None;
        return;
    }
    let cur = app.selected.unwrap_or(0) as isize;
    let next = cur.saturating_add(delta).clamp(0, len as isize - 1);
    app.selected = Some(next as usize);
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_query("");
        }
        KeyCode::Backspace => {
            let mut q = app.view.query().to_string();
            if q.pop().is_some() {
                app.set_query(&q);
            }
        }
        KeyCode::Char(c) => {
            let mut q = app.view.query().to_string();
            q.push(c);
            app.set_query(&q);
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Form(form)) => match code {
            KeyCode::Esc => {
                close_modal(app);
                app.set_status(Severity::Info, "Cancelled");
            }
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
            KeyCode::Backspace => {
                form.focused_mut().pop();
            }
            KeyCode::Char(c) => form.focused_mut().push(c),
            KeyCode::Enter => {
                let form = form.clone();
                let res = match form.mode {
                    FormMode::Add => app.add_item(&form.name, &form.quantity, &form.price),
                    FormMode::Edit => app.update_selected(&form.name, &form.quantity, &form.price),
                };
                // on failure the form stays open with its text intact
                if res.is_ok() {
                    close_modal(app);
                }
            }
            _ => {}
        },
        Some(ModalState::DeleteConfirm { selected }) => match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                close_modal(app);
                app.set_status(Severity::Info, "Delete cancelled");
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *selected = 1 - (*selected).min(1);
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                close_modal(app);
                let _ = app.delete_selected();
            }
            KeyCode::Enter => {
                let confirmed = *selected == 0;
                close_modal(app);
                if confirmed {
                    let _ = app.delete_selected();
                } else {
                    app.set_status(Severity::Info, "Delete cancelled");
                }
            }
            _ => {}
        },
        Some(ModalState::ExportPath { path }) => match code {
            KeyCode::Esc => {
                close_modal(app);
                app.set_status(Severity::Info, "Export cancelled");
            }
            KeyCode::Backspace => {
                path.pop();
            }
            KeyCode::Char(c) => path.push(c),
            KeyCode::Enter => {
                let chosen = path.trim().to_string();
                close_modal(app);
                if chosen.is_empty() {
                    app.set_status(Severity::Warning, "Export path cannot be empty");
                } else {
                    let _ = app.export_to(PathBuf::from(chosen));
                }
            }
            _ => {}
        },
        Some(ModalState::Help) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')) {
                close_modal(app);
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
}

fn open_modal(app: &mut AppState, modal: ModalState) {
    app.modal = Some(modal);
    app.input_mode = InputMode::Modal;
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
