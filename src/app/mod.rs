//! Application state types and entry glue.
//!
//! Defines the state the TUI renders from, the five surface operations that
//! drive the inventory core (add, update, delete, query, export), theming,
//! and config-file lookup. The event loop lives in [`update`] and is
//! re-exported as `run`.
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, Severity};
use crate::export;
use crate::inventory::{Inventory, Item};
use crate::search::FilteredView;

/// Directory name used under the user's config home.
pub const APP_DIR: &str = "inventory-manager";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x6c, 0x70, 0x86),        // overlay0
            title: Color::Rgb(0x89, 0xb4, 0xfa),        // blue
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x18, 0x18, 0x25),    // mantle
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            info: Color::Rgb(0x89, 0xdc, 0xeb),         // sky
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
            warning: Color::Rgb(0xfa, 0xb3, 0x87),      // peach
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Status bar color for a severity.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            let Some(color) = Self::parse_color(val) else {
                tracing::warn!(key, val, "ignoring unparsable theme color");
                continue;
            };
            match key {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "info" => theme.info = color,
                "success" => theme.success = color,
                "warning" => theme.warning = color,
                "error" => theme.error = color,
                _ => {}
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB"), "index:N" or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        if let Some(n) = lower.strip_prefix("index:") {
            return n.trim().parse::<u8>().ok().map(Color::Indexed);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# inventory-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, index:N (0-255), or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors get a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("info", self.info);
        kv("success", self.success);
        kv("warning", self.warning);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Load the theme from `path`; if missing, write the default theme there and return it.
    pub fn load_or_init(path: &str) -> Self {
        let p = Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::debug!(path, error = %e, "could not write default theme");
        }
        t
    }
}

/// Which field of the item form has focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Quantity,
    Price,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Quantity,
            Self::Quantity => Self::Price,
            Self::Price => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Price,
            Self::Quantity => Self::Name,
            Self::Price => Self::Quantity,
        }
    }
}

/// Whether the item form creates a new item or edits the selected one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// Text of the add/update form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemForm {
    pub mode: FormMode,
    pub focus: FormField,
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl ItemForm {
    pub fn empty(mode: FormMode) -> Self {
        Self {
            mode,
            focus: FormField::Name,
            name: String::new(),
            quantity: String::new(),
            price: String::new(),
        }
    }

    pub fn from_item(item: &Item) -> Self {
        Self {
            mode: FormMode::Edit,
            focus: FormField::Name,
            name: item.name().to_string(),
            quantity: item.quantity_text(),
            price: item.price_text(),
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Quantity => &mut self.quantity,
            FormField::Price => &mut self.price,
        }
    }
}

/// Modal dialog states.
#[derive(Clone, Debug)]
pub enum ModalState {
    Form(ItemForm),
    DeleteConfirm {
        /// 0 = Yes, 1 = No
        selected: usize,
    },
    ExportPath {
        path: String,
    },
    Help,
}

/// Last status message shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub severity: Severity,
    pub message: String,
}

impl Status {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

pub struct AppState {
    pub inventory: Inventory,
    pub view: FilteredView,
    /// Selected row of the filtered view, if any.
    pub selected: Option<usize>,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub modal: Option<ModalState>,
    pub status: Status,
    pub export_path: PathBuf,
}

impl AppState {
    /// Create the state used by the binary, loading theme and keybindings
    /// from `config_dir`.
    pub fn new(config_dir: &Path, export_path: PathBuf) -> Self {
        let theme_path = config_file_read_path("theme.conf", config_dir);
        let keys_path = config_file_read_path("keybinds.conf", config_dir);
        let mut app = Self::in_memory(export_path);
        app.theme = Theme::load_or_init(&theme_path.to_string_lossy());
        app.keymap = keymap::Keymap::load_or_init(&keys_path.to_string_lossy());
        app
    }

    /// State with an empty inventory and built-in theme/keys; touches no files.
    pub fn in_memory(export_path: PathBuf) -> Self {
        Self {
            inventory: Inventory::new(),
            view: FilteredView::default(),
            selected: None,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            theme: Theme::mocha(),
            keymap: keymap::Keymap::default(),
            modal: None,
            status: Status::new(Severity::Info, "Ready"),
            export_path,
        }
    }

    /// Inventory position behind the current selection.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|row| self.view.inventory_index(row))
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_index().and_then(|i| self.inventory.at(i).ok())
    }

    pub fn set_status(&mut self, severity: Severity, message: impl Into<String>) {
        self.status = Status::new(severity, message);
    }

    /// Parse the form text and append a new item.
    pub fn add_item(&mut self, name: &str, quantity: &str, price: &str) -> Result<(), InventoryError> {
        let item = self.checked(Item::parse(name, quantity, price))?;
        tracing::info!(name = item.name(), quantity = item.quantity(), price = item.price(), "item added");
        self.inventory.append(item);
        self.refresh_view();
        self.set_status(Severity::Success, "Item added successfully");
        Ok(())
    }

    /// Replace the selected item with one parsed from the form text.
    pub fn update_selected(&mut self, name: &str, quantity: &str, price: &str) -> Result<(), InventoryError> {
        let target = self.selection_target("update");
        let index = self.checked(target)?;
        let item = self.checked(Item::parse(name, quantity, price))?;
        tracing::info!(index, name = item.name(), "item updated");
        let replaced = self.inventory.replace(index, item);
        self.checked(replaced)?;
        self.refresh_view();
        self.set_status(Severity::Success, "Item updated successfully");
        Ok(())
    }

    /// Remove the selected item.
    pub fn delete_selected(&mut self) -> Result<(), InventoryError> {
        let target = self.selection_target("delete");
        let index = self.checked(target)?;
        let removed = self.inventory.remove(index);
        let removed = self.checked(removed)?;
        tracing::info!(index, name = removed.name(), "item deleted");
        self.refresh_view();
        self.set_status(Severity::Success, format!("Deleted \"{}\"", removed.name()));
        Ok(())
    }

    /// Change the search query and recompute the view. Selection moves to
    /// the first match.
    pub fn set_query(&mut self, query: &str) {
        self.view.set_query(&self.inventory, query);
        self.selected = if self.view.is_empty() { None } else { Some(0) };
        tracing::debug!(query, matches = self.view.len(), "query changed");
        let msg = if query.is_empty() {
            format!("Showing all {} items", self.view.len())
        } else {
            format!("{} of {} items match \"{}\"", self.view.len(), self.inventory.len(), query)
        };
        self.set_status(Severity::Info, msg);
    }

    /// Export to the current export path.
    pub fn export_now(&mut self) -> Result<(), InventoryError> {
        let path = self.export_path.clone();
        self.export_to(path)
    }

    /// Export to `path`, which becomes the export path for later exports.
    pub fn export_to(&mut self, path: PathBuf) -> Result<(), InventoryError> {
        self.export_path = path;
        let res = export::export_to_path(&self.inventory, &self.export_path);
        let res = self.checked(res);
        if res.is_ok() {
            let msg = format!("Inventory exported to {}", self.export_path.display());
            self.set_status(Severity::Success, msg);
        }
        res
    }

    /// Recompute the view after a mutation and keep the selection on a
    /// valid row.
    fn refresh_view(&mut self) {
        self.view.refresh(&self.inventory);
        let len = self.view.len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, Some(row)) => Some(row.min(len - 1)),
            (_, None) => Some(0),
        };
    }

    fn selection_target(&self, verb: &str) -> Result<usize, InventoryError> {
        let row = self.selected.ok_or(InventoryError::NoSelection)?;
        self.view.inventory_index(row).ok_or_else(|| {
            tracing::debug!(row, verb, "selection points past the view");
            InventoryError::OutOfRange {
                index: row,
                len: self.view.len(),
            }
        })
    }

    /// Report an error in the status bar and the log, passing it through.
    fn checked<T>(&mut self, res: Result<T, InventoryError>) -> Result<T, InventoryError> {
        if let Err(e) = &res {
            match e.severity() {
                Severity::Error => tracing::error!(error = %e, "operation failed"),
                _ => tracing::warn!(error = %e, "operation rejected"),
            }
            let msg = match e {
                InventoryError::NoSelection => "Select an item first".to_string(),
                other => other.to_string(),
            };
            self.set_status(e.severity(), msg);
        }
        res
    }
}

/// Per-user config directory: `$XDG_CONFIG_HOME/inventory-manager`, else
/// `$HOME/.config/inventory-manager`.
pub fn default_config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join(APP_DIR))
}

/// Where to read `name` from: the working directory if the file exists
/// there, else `config_dir` (where defaults get written when missing).
pub fn config_file_read_path(name: &str, config_dir: &Path) -> PathBuf {
    let local = PathBuf::from(name);
    if local.is_file() {
        return local;
    }
    config_dir.join(name)
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        AppState::in_memory(PathBuf::from("unused.csv"))
    }

    #[test]
    fn add_sets_success_status_and_selects_first_row() {
        let mut app = app();
        app.add_item("Pen", "10", "1.5").unwrap();
        assert_eq!(app.status.severity, Severity::Success);
        assert_eq!(app.selected, Some(0));
        assert_eq!(app.view.len(), 1);
    }

    #[test]
    fn invalid_input_sets_warning_and_leaves_inventory() {
        let mut app = app();
        let err = app.add_item("", "1", "1").unwrap_err();
        assert!(matches!(err, InventoryError::InvalidField(_)));
        assert_eq!(app.status.severity, Severity::Warning);
        assert!(app.inventory.is_empty());
    }

    #[test]
    fn update_without_selection_is_rejected() {
        let mut app = app();
        assert!(matches!(
            app.update_selected("X", "1", "1"),
            Err(InventoryError::NoSelection)
        ));
        assert!(matches!(app.delete_selected(), Err(InventoryError::NoSelection)));
        assert_eq!(app.status.message, "Select an item first");
    }

    #[test]
    fn invalid_update_keeps_original_item() {
        let mut app = app();
        app.add_item("Pen", "10", "1.5").unwrap();
        assert!(app.update_selected("Pencil", "x", "1").is_err());
        assert_eq!(app.inventory.at(0).unwrap().name(), "Pen");
    }

    #[test]
    fn selection_is_clamped_after_delete() {
        let mut app = app();
        app.add_item("a", "1", "1").unwrap();
        app.add_item("b", "1", "1").unwrap();
        app.selected = Some(1);
        app.delete_selected().unwrap();
        assert_eq!(app.selected, Some(0));
        app.delete_selected().unwrap();
        assert_eq!(app.selected, None);
    }

    #[test]
    fn theme_parse_color_variants() {
        assert_eq!(Theme::parse_color("#a6e3a1"), Some(Color::Rgb(0xa6, 0xe3, 0xa1)));
        assert_eq!(Theme::parse_color("A6E3A1"), Some(Color::Rgb(0xa6, 0xe3, 0xa1)));
        assert_eq!(Theme::parse_color("Reset"), Some(Color::Reset));
        assert_eq!(Theme::parse_color("green"), None);
        assert_eq!(Theme::parse_color("#ééé"), None);
        assert_eq!(Theme::parse_color("index:208"), Some(Color::Indexed(208)));
        assert_eq!(Theme::parse_color("index:300"), None);
    }

    #[test]
    fn indexed_theme_color_survives_write_back() {
        let path = std::env::temp_dir().join(format!("invmgr-theme-indexed-{}.conf", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        let mut theme = Theme::mocha();
        theme.border = Color::Indexed(240);
        theme.write_file(&path).unwrap();
        let back = Theme::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(back.border, Color::Indexed(240));
    }

    #[test]
    fn config_lookup_falls_back_to_config_dir() {
        let dir = std::env::temp_dir().join("invmgr-config-lookup");
        let p = config_file_read_path("no-such-file-here.conf", &dir);
        assert_eq!(p, dir.join("no-such-file-here.conf"));
    }

    #[test]
    fn form_focus_cycles() {
        let f = FormField::Name;
        assert_eq!(f.next().next().next(), FormField::Name);
        assert_eq!(f.prev(), FormField::Price);
    }
}
