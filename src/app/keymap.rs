//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings only apply in normal mode. Text entry (search prompt, item form,
//! export path) reads keys directly so every printable character can be typed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Several key combinations may map to the same action (e.g. both `j` and
/// Down move the selection down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the help/keybindings dialog.
    OpenHelp,
    /// Enter live search mode.
    StartSearch,
    /// Drop the current query and show every item.
    ClearSearch,
    /// Open an empty form for a new item.
    AddItem,
    /// Open the form prefilled with the selected item.
    EditItem,
    /// Ask for confirmation, then delete the selected item.
    DeleteItem,
    /// Export to the current export path.
    Export,
    /// Prompt for an export path, then export.
    ExportAs,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Swallow the key.
    Ignore,
}

/// Every action with its config-file name, in the order it is documented.
const ACTIONS: &[(KeyAction, &str)] = &[
    (KeyAction::Quit, "Quit"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::ClearSearch, "ClearSearch"),
    (KeyAction::AddItem, "AddItem"),
    (KeyAction::EditItem, "EditItem"),
    (KeyAction::DeleteItem, "DeleteItem"),
    (KeyAction::Export, "Export"),
    (KeyAction::ExportAs, "ExportAs"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::Top, "Top"),
    (KeyAction::Bottom, "Bottom"),
    (KeyAction::Ignore, "Ignore"),
];

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings: arrows and vim-style keys
    /// for navigation, single letters for item commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Esc), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('a')), KeyAction::AddItem);
        bindings.insert((M::NONE, Char('n')), KeyAction::AddItem);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditItem);
        bindings.insert((M::NONE, Enter), KeyAction::EditItem);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteItem);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteItem);
        bindings.insert((M::NONE, Char('x')), KeyAction::Export);
        bindings.insert((M::NONE, Char('X')), KeyAction::ExportAs);
        // Some terminals report uppercase letters with SHIFT set
        bindings.insert((M::SHIFT, Char('X')), KeyAction::ExportAs);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Home), KeyAction::Top);
        bindings.insert((M::NONE, End), KeyAction::Bottom);
        bindings.insert((M::NONE, Char('g')), KeyAction::Top);
        bindings.insert((M::NONE, Char('G')), KeyAction::Bottom);
        bindings.insert((M::SHIFT, Char('G')), KeyAction::Bottom);

        Self { bindings }
    }

    /// Load a keymap from `path`, or write the defaults there when it does
    /// not exist yet.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::debug!(path, error = %e, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// Lines use `<Action> = <KeySpec>`; the defaults are kept and the file's
    /// bindings override them. Returns `None` if the file cannot be read.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_config_str(&contents))
    }

    /// Parse config text on top of the defaults. Malformed lines are skipped.
    pub fn from_config_str(contents: &str) -> Self {
        let mut map = Self::default();
        for (lineno, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::warn!(line = lineno + 1, text = line, "ignoring keybinding"),
            }
        }
        map
    }

    /// Write a readable dump of the current bindings, grouped by action.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# inventory-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Tab, Up, Down, PageUp, PageDown, Home, End, Delete, /, ?\n");
        let names: Vec<&str> = ACTIONS.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        for (action, name) in ACTIONS {
            for k in self.keys_for(*action) {
                let _ = writeln!(&mut buf, "{} = {}", name, k);
            }
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its action, if bound. A SHIFT+letter event
    /// falls back to the plain uppercase binding.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(a) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*a);
        }
        if key.modifiers == KeyModifiers::SHIFT {
            if let KeyCode::Char(_) = key.code {
                return self.bindings.get(&(KeyModifiers::NONE, key.code)).copied();
            }
        }
        None
    }

    /// Keys bound to `action`, formatted for display and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+c" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTIONS.iter().find(|(_, name)| *name == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTIONS
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}
