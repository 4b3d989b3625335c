//! Key binding definitions and the key map trait used for help lines.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// A human-readable description of the action this binding performs.
    pub description: String,
    /// Whether this binding is currently active. Disabled bindings never match.
    pub enabled: bool,
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code (e.g. a character, arrow key, or function key).
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a new binding for a single key combination with the given description.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Create a new binding for multiple key combinations with the given description.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Return whether the given key event matches any of this binding's key
    /// combinations. Modifiers must match exactly, so `Ctrl+U` does not fire
    /// the binding for a plain `u`. Always `false` when disabled.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && event.modifiers == k.modifiers)
    }

    /// Set whether this binding is enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Keys joined with `/`, e.g. `"↑/ctrl+p"`.
    pub fn keys_label(&self) -> String {
        self.keys
            .iter()
            .map(KeyCombination::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    /// Create a key combination with the Ctrl modifier.
    pub fn ctrl(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::CONTROL)
    }

    /// Create a key combination with the Alt modifier.
    pub fn alt(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::ALT)
    }

    /// Create a key combination with an explicit set of modifier keys.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Short human-readable form, e.g. `"ctrl+u"` or `"↓"`.
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "shift+tab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "del".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pgup".to_string(),
            KeyCode::PageDown => "pgdn".to_string(),
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("f{n}"),
            other => format!("{other:?}").to_lowercase(),
        };
        let mut prefix = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            prefix.push_str("ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            prefix.push_str("alt+");
        }
        prefix + &key
    }
}

/// Types that expose their key bindings for a help line.
pub trait KeyMap {
    /// The most important bindings, in display order.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Render bindings as `"keys description • keys description"`, skipping
/// disabled ones.
pub fn help_line(bindings: &[&Binding]) -> String {
    bindings
        .iter()
        .filter(|b| b.enabled)
        .map(|b| format!("{} {}", b.keys_label(), b.description))
        .collect::<Vec<_>>()
        .join(" • ")
}
