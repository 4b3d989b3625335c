//! Searchable single-choice select backed by an integer value.
//!
//! The control renders as a bordered input with a chevron. Opening it shows
//! a popup listing the options sorted with Spanish collation; typing filters
//! them by substring. While nothing is typed the list is revealed in pages:
//! the first `initial_visible_count` options are shown and scrolling near
//! the bottom adds `page_step` more. Choosing an option, or clearing the
//! current one, is reported upward as [`Message::Changed`]; the parent owns
//! the value and writes it back with [`SearchableSelect::set_value`].
//!
//! While open the select subscribes to pointer-down events so a click
//! anywhere outside its trigger and popup closes it.
//!
//! # Example
//!
//! ```ignore
//! use plaza_widgets::option::{FieldResolver, Record};
//! use plaza_widgets::searchable_select::{Message, SearchableSelect};
//!
//! let mut cost_center = SearchableSelect::records(Record::parse_list(json)?)
//!     .with_fields(FieldResolver::new().with_display_field("nombre"))
//!     .with_label("Cost center")
//!     .with_required(true);
//!
//! // in the parent's update:
//! if let Message::Changed(id) = msg {
//!     cost_center.set_value(id);
//! }
//! ```

use crate::catalog::{IndexedOption, OptionIndex};
use crate::chrome::field_block;
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::option::{FieldResolver, ItemResolver, OptionResolver, Record, SelectItem};
use crate::runeutil::truncate;
use crate::selection::SelectionState;
use crate::text_edit::SearchText;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use plaza_core::event::hits;
use plaza_core::{pointer_events, Command, Component, Subscription};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Options shown before any scrolling.
pub const DEFAULT_INITIAL_VISIBLE_COUNT: usize = 10;
/// Options added per reveal.
pub const DEFAULT_PAGE_STEP: usize = 10;
/// Rows from the bottom at which a scroll reveals more.
pub const DEFAULT_SCROLL_THRESHOLD: usize = 2;
/// Option rows in the popup.
pub const DEFAULT_MAX_ROWS: usize = 8;

const CLEAR_GLYPH: &str = "✕";
const CHEVRON_CLOSED: &str = "▾";
const CHEVRON_OPEN: &str = "▴";
const HIGHLIGHT_SYMBOL: &str = "▸ ";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Messages for the searchable select.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press routed by the parent while this field has focus.
    KeyPress(KeyEvent),
    /// A mouse event routed by the parent.
    Mouse(MouseEvent),
    /// A pointer-down from the select's own outside-click subscription.
    PointerDown(MouseEvent),
    /// The field gained focus. Opens the select.
    Focus,
    /// The field lost focus. Closes the select.
    Blur,
    /// Open when closed, close when open.
    Toggle,
    /// Pasted text, appended to the search term.
    Paste(String),
    /// Scroll the option list by the given number of rows.
    ScrollList(isize),
    /// Choose the option at this position of the visible list.
    Pick(usize),
    /// Reset the value to 0.
    Clear,
    /// The user chose a value (0 when cleared). Handled by the parent.
    Changed(i64),
}

/// The three states the control can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectState {
    /// Popup hidden; the input shows the selected option.
    Closed,
    /// Popup shown with an empty search term; options revealed in pages.
    Browse,
    /// Popup shown with a search term; every match is listed.
    Search,
}

/// User-facing strings.
#[derive(Debug, Clone)]
pub struct SelectTexts {
    /// Shown in the closed input when nothing is selected.
    pub placeholder: String,
    /// Shown in the open input before anything is typed.
    pub search_placeholder: String,
    /// Shown in the popup when no option matches.
    pub no_options: String,
    /// Footer while more options can be revealed. `{shown}` and `{total}`
    /// are substituted.
    pub more_hint: String,
}

impl Default for SelectTexts {
    fn default() -> Self {
        Self {
            placeholder: "Select an option".to_string(),
            search_placeholder: "Type to search".to_string(),
            no_options: "No options found".to_string(),
            more_hint: "{shown} of {total} · scroll for more".to_string(),
        }
    }
}

impl SelectTexts {
    /// The footer text for `shown` of `total` options.
    pub fn more_hint(&self, shown: usize, total: usize) -> String {
        self.more_hint
            .replace("{shown}", &shown.to_string())
            .replace("{total}", &total.to_string())
    }
}

/// Style configuration for the select.
#[derive(Debug, Clone)]
pub struct SelectStyle {
    /// Input text.
    pub text: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// Cursor cell in the search input.
    pub cursor: Style,
    /// Unhighlighted option rows.
    pub item: Style,
    /// The highlighted option row.
    pub highlighted: Style,
    /// The row holding the current value.
    pub chosen: Style,
    /// The "no options" message.
    pub empty: Style,
    /// The pagination footer.
    pub hint: Style,
    /// The clear glyph and chevron.
    pub glyph: Style,
    /// Popup border.
    pub popup_border: Style,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            item: Style::default(),
            highlighted: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            chosen: Style::default().add_modifier(Modifier::UNDERLINED),
            empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            hint: Style::default().fg(Color::DarkGray),
            glyph: Style::default().fg(Color::Gray),
            popup_border: Style::default().fg(Color::Cyan),
        }
    }
}

/// Key bindings for the select.
///
/// Text editing keys (characters, Backspace, Delete, Left, Right, Home,
/// End) are fixed; everything else can be rebound:
///
/// ```ignore
/// let mut keys = SelectKeyBindings::default();
/// keys.clear_value = Binding::new(KeyCombination::ctrl(KeyCode::Char('r')), "Reset");
/// let select = select.with_key_bindings(keys);
/// ```
#[derive(Debug, Clone)]
pub struct SelectKeyBindings {
    /// Open while closed. Default: Enter, Down, Alt+Down
    pub open: Binding,
    /// Close without choosing. Default: Esc
    pub close: Binding,
    /// Choose the highlighted option. Default: Enter
    pub select: Binding,
    /// Default: Up
    pub up: Binding,
    /// Default: Down
    pub down: Binding,
    /// Default: PageUp
    pub page_up: Binding,
    /// Default: PageDown
    pub page_down: Binding,
    /// Highlight the first option. Default: Ctrl+Home
    pub first: Binding,
    /// Highlight the last shown option. Default: Ctrl+End
    pub last: Binding,
    /// Empty the search term. Default: Ctrl+U
    pub clear_search: Binding,
    /// Delete the word before the cursor. Default: Ctrl+W
    pub delete_word: Binding,
    /// Reset the value to 0. Default: Ctrl+X
    pub clear_value: Binding,
}

impl Default for SelectKeyBindings {
    fn default() -> Self {
        Self {
            open: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::alt(KeyCode::Down),
                ],
                "Open",
            ),
            close: Binding::new(KeyCombination::new(KeyCode::Esc), "Close"),
            select: Binding::new(KeyCombination::new(KeyCode::Enter), "Choose"),
            up: Binding::new(KeyCombination::new(KeyCode::Up), "Up"),
            down: Binding::new(KeyCombination::new(KeyCode::Down), "Down"),
            page_up: Binding::new(KeyCombination::new(KeyCode::PageUp), "Page up"),
            page_down: Binding::new(KeyCombination::new(KeyCode::PageDown), "Page down"),
            first: Binding::new(KeyCombination::ctrl(KeyCode::Home), "First"),
            last: Binding::new(KeyCombination::ctrl(KeyCode::End), "Last"),
            clear_search: Binding::new(KeyCombination::ctrl(KeyCode::Char('u')), "Clear search"),
            delete_word: Binding::new(KeyCombination::ctrl(KeyCode::Char('w')), "Delete word"),
            clear_value: Binding::new(KeyCombination::ctrl(KeyCode::Char('x')), "Clear"),
        }
    }
}

impl KeyMap for SelectKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.up,
            &self.down,
            &self.select,
            &self.close,
            &self.clear_value,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Open,
    Close,
    Select,
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
    ClearSearch,
    DeleteWord,
    ClearValue,
}

/// Hit regions inside the trigger.
struct TriggerLayout {
    text: Rect,
    clear: Option<Rect>,
    chevron: Rect,
}

impl TriggerLayout {
    fn new(area: Rect, shows_clear: bool) -> Self {
        let inner = Block::new().borders(Borders::ALL).inner(area);
        let row = |x: u16, width: u16| Rect {
            x,
            y: inner.y,
            width,
            height: inner.height.min(1),
        };
        let chevron = row(inner.right().saturating_sub(1), inner.width.min(1));
        let clear = (shows_clear && inner.width >= 6).then(|| row(inner.right() - 3, 1));
        let reserved = if clear.is_some() { 4 } else { 2 };
        Self {
            text: row(inner.x, inner.width.saturating_sub(reserved)),
            clear,
            chevron,
        }
    }
}

/// A searchable single-choice select.
///
/// `T` is the caller's option type; an [`OptionResolver`] turns each option
/// into display text and an integer value. The option list is only read,
/// never modified.
pub struct SearchableSelect<T: Send + 'static = Record> {
    id: String,
    options: Vec<T>,
    resolver: Box<dyn OptionResolver<T>>,
    index: OptionIndex,
    filtered: Vec<usize>,
    value: i64,
    label: String,
    required: bool,
    disabled: bool,
    show_errors: bool,
    open: bool,
    focus: bool,
    search: SearchText,
    visible_count: usize,
    initial_visible_count: usize,
    page_step: usize,
    scroll_threshold: usize,
    max_rows: usize,
    selection: SelectionState,
    opened_by: Option<MouseEvent>,
    texts: SelectTexts,
    style: SelectStyle,
    keys: SelectKeyBindings,
    trigger_area: Cell<Rect>,
    popup_area: Cell<Rect>,
    list_area: Cell<Rect>,
}

impl SearchableSelect<Record> {
    /// A select over JSON records using the default [`FieldResolver`].
    pub fn records(options: Vec<Record>) -> Self {
        Self::new(options, FieldResolver::default())
    }

    /// Configure which record fields supply display text and value.
    pub fn with_fields(self, fields: FieldResolver) -> Self {
        self.with_resolver(fields)
    }
}

impl<T: SelectItem> SearchableSelect<T> {
    /// A select over types implementing [`SelectItem`].
    pub fn items(options: Vec<T>) -> Self {
        Self::new(options, ItemResolver)
    }
}

impl<T: Send + 'static> SearchableSelect<T> {
    /// Create a closed select with value 0.
    pub fn new(options: Vec<T>, resolver: impl OptionResolver<T>) -> Self {
        let resolver: Box<dyn OptionResolver<T>> = Box::new(resolver);
        let index = OptionIndex::build(&options, resolver.as_ref());
        let filtered = index.filter("");
        let window = filtered.len().min(DEFAULT_INITIAL_VISIBLE_COUNT);
        Self {
            id: format!("searchable-select-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            options,
            resolver,
            index,
            filtered,
            value: 0,
            label: String::new(),
            required: false,
            disabled: false,
            show_errors: false,
            open: false,
            focus: false,
            search: SearchText::new(),
            visible_count: DEFAULT_INITIAL_VISIBLE_COUNT,
            initial_visible_count: DEFAULT_INITIAL_VISIBLE_COUNT,
            page_step: DEFAULT_PAGE_STEP,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            max_rows: DEFAULT_MAX_ROWS,
            selection: SelectionState::new(window, DEFAULT_MAX_ROWS),
            opened_by: None,
            texts: SelectTexts::default(),
            style: SelectStyle::default(),
            keys: SelectKeyBindings::default(),
            trigger_area: Cell::new(Rect::default()),
            popup_area: Cell::new(Rect::default()),
            list_area: Cell::new(Rect::default()),
        }
    }

    /// Identify this select's outside-click subscription. Must be unique
    /// among selects that can be open at the same time.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Set the label shown in the border.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the closed-input placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.texts.placeholder = placeholder.into();
        self
    }

    /// Mark the field as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Disable all interaction.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Replace the option resolver.
    pub fn with_resolver(mut self, resolver: impl OptionResolver<T>) -> Self {
        self.set_resolver(resolver);
        self
    }

    /// Options shown before scrolling. Clamped to at least 1.
    pub fn with_initial_visible_count(mut self, count: usize) -> Self {
        self.initial_visible_count = count.max(1);
        self.visible_count = self.initial_visible_count;
        self.selection.set_count(self.window_len());
        self
    }

    /// Options added per reveal. Clamped to at least 1.
    pub fn with_page_step(mut self, step: usize) -> Self {
        self.page_step = step.max(1);
        self
    }

    /// Rows from the bottom at which scrolling reveals more.
    pub fn with_scroll_threshold(mut self, rows: usize) -> Self {
        self.scroll_threshold = rows;
        self
    }

    /// Option rows in the popup. Clamped to at least 1.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows.max(1);
        self.selection.set_visible(self.max_rows);
        self
    }

    /// Replace the user-facing strings.
    pub fn with_texts(mut self, texts: SelectTexts) -> Self {
        self.texts = texts;
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: SelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the key bindings.
    pub fn with_key_bindings(mut self, keys: SelectKeyBindings) -> Self {
        self.keys = keys;
        self
    }

    /// Write back the value chosen by the user, or any externally set value.
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// Replace the options. The search term is kept; the highlight is
    /// clamped to the new list.
    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
        self.reindex();
    }

    /// Replace the resolver and re-resolve every option.
    pub fn set_resolver(&mut self, resolver: impl OptionResolver<T>) {
        self.resolver = Box::new(resolver);
        self.reindex();
    }

    /// Enable or disable the field. Disabling closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.open {
            self.close_popup();
        }
    }

    /// Render the field as invalid when required and empty.
    pub fn set_show_errors(&mut self, show: bool) {
        self.show_errors = show;
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// False when required and nothing is selected.
    pub fn is_valid(&self) -> bool {
        !self.required || self.value != 0
    }

    pub fn state(&self) -> SelectState {
        match (self.open, self.search.is_empty()) {
            (false, _) => SelectState::Closed,
            (true, true) => SelectState::Browse,
            (true, false) => SelectState::Search,
        }
    }

    pub fn search_term(&self) -> String {
        self.search.value()
    }

    /// Number of options currently listed: every match while searching,
    /// at most the revealed count while browsing.
    pub fn visible_count(&self) -> usize {
        self.window_len()
    }

    /// Number of options matching the search term.
    pub fn match_count(&self) -> usize {
        self.filtered.len()
    }

    /// The listed options, in display order.
    pub fn visible_options(&self) -> Vec<&IndexedOption> {
        (0..self.window_len())
            .filter_map(|pos| self.entry_at(pos))
            .collect()
    }

    /// The highlighted option, if the list is not empty.
    pub fn highlighted(&self) -> Option<&IndexedOption> {
        if self.window_len() == 0 {
            return None;
        }
        self.entry_at(self.selection.cursor())
    }

    /// Display text of the option holding the current value.
    pub fn selected_label(&self) -> Option<&str> {
        if self.value == 0 {
            return None;
        }
        self.index
            .find_value(self.value)
            .map(|entry| entry.display.as_str())
    }

    /// What the input shows: the search term while open, otherwise the
    /// selected option's text (empty when there is none).
    pub fn input_text(&self) -> String {
        if self.open {
            self.search.value()
        } else {
            self.selected_label().unwrap_or_default().to_string()
        }
    }

    pub fn key_bindings(&self) -> &SelectKeyBindings {
        &self.keys
    }

    /// Whether `mouse` lands on the open popup as last drawn. A popup can
    /// cover other fields, so a parent routes such clicks to this select only.
    pub fn popup_contains(&self, mouse: &MouseEvent) -> bool {
        self.open && hits(self.popup_area.get(), mouse)
    }

    /// Whether `mouse` lands on the trigger or the open popup.
    pub fn contains(&self, mouse: &MouseEvent) -> bool {
        hits(self.trigger_area.get(), mouse) || self.popup_contains(mouse)
    }

    fn window_len(&self) -> usize {
        if self.search.is_empty() {
            self.visible_count.min(self.filtered.len())
        } else {
            self.filtered.len()
        }
    }

    fn entry_at(&self, pos: usize) -> Option<&IndexedOption> {
        self.filtered
            .get(pos)
            .and_then(|&sorted| self.index.get(sorted))
    }

    fn shows_clear(&self) -> bool {
        self.value != 0 && !self.disabled
    }

    fn reindex(&mut self) {
        self.index = OptionIndex::build(&self.options, self.resolver.as_ref());
        self.filtered = self.index.filter(&self.search.value());
        self.selection.set_count(self.window_len());
    }

    /// Recompute matches after the search term changed.
    fn refilter(&mut self) {
        self.filtered = self.index.filter(&self.search.value());
        if self.search.is_empty() {
            self.visible_count = self.initial_visible_count;
        }
        self.selection.set_count(self.window_len());
        self.selection.reset();
    }

    fn open_popup(&mut self, trigger: Option<MouseEvent>) {
        if self.disabled || self.open {
            return;
        }
        self.open = true;
        self.focus = true;
        self.opened_by = trigger;
        self.search.clear();
        self.refilter();
        let current = (0..self.window_len())
            .find(|&pos| self.entry_at(pos).is_some_and(|e| e.value == self.value));
        if let Some(pos) = current {
            self.selection.select(pos);
        }
        tracing::debug!(select = %self.id, options = self.index.len(), "select opened");
    }

    fn close_popup(&mut self) {
        self.open = false;
        self.opened_by = None;
        self.popup_area.set(Rect::default());
        self.list_area.set(Rect::default());
        self.search.clear();
        self.refilter();
        tracing::debug!(select = %self.id, "select closed");
    }

    fn toggle(&mut self, trigger: Option<MouseEvent>) {
        if self.open {
            self.close_popup();
        } else {
            self.open_popup(trigger);
        }
    }

    fn pick(&mut self, pos: usize) -> Command<Message> {
        if !self.open || pos >= self.window_len() {
            return Command::none();
        }
        let Some(value) = self.entry_at(pos).map(|entry| {
            tracing::debug!(select = %self.id, value = entry.value, label = %entry.display, "option chosen");
            entry.value
        }) else {
            return Command::none();
        };
        self.close_popup();
        Command::message(Message::Changed(value))
    }

    fn clear(&mut self) -> Command<Message> {
        if self.disabled || self.value == 0 {
            return Command::none();
        }
        self.search.clear();
        self.refilter();
        tracing::debug!(select = %self.id, previous = self.value, "value cleared");
        Command::message(Message::Changed(0))
    }

    fn edit(&mut self, f: impl FnOnce(&mut SearchText) -> bool) {
        if f(&mut self.search) {
            self.refilter();
        }
    }

    /// Grow the revealed window when browsing and scrolled near its bottom.
    fn reveal_more(&mut self) -> bool {
        if !self.search.is_empty() {
            return false;
        }
        let total = self.filtered.len();
        if self.visible_count >= total || self.selection.rows_below() > self.scroll_threshold {
            return false;
        }
        self.visible_count = (self.visible_count + self.page_step).min(total);
        self.selection.set_count(self.window_len());
        tracing::debug!(select = %self.id, shown = self.visible_count, total, "revealed more options");
        true
    }

    fn scroll_list(&mut self, delta: isize) {
        if !self.open {
            return;
        }
        let before = self.selection.offset();
        self.selection.scroll_by(delta);
        if delta > 0 || self.selection.offset() != before {
            self.reveal_more();
        }
    }

    /// Match the highlight viewport to the list rows last drawn. A popup
    /// squeezed by the screen shows fewer than `max_rows`.
    fn sync_viewport(&mut self) {
        let rows = match usize::from(self.list_area.get().height) {
            0 => self.max_rows,
            rows => rows,
        };
        if rows != self.selection.visible() {
            self.selection.set_visible(rows);
        }
    }

    fn navigate(&mut self, f: impl FnOnce(&mut SelectionState)) {
        let before = (self.selection.cursor(), self.selection.offset());
        f(&mut self.selection);
        let scrolled = self.selection.offset() != before.1;
        let at_last = self.selection.cursor() + 1 == self.window_len();
        if scrolled || (at_last && self.selection.cursor() != before.0) {
            self.reveal_more();
        }
    }

    fn key_action(&self, key: &KeyEvent) -> Option<KeyAction> {
        let k = &self.keys;
        let table = if self.open {
            vec![
                (&k.close, KeyAction::Close),
                (&k.select, KeyAction::Select),
                (&k.up, KeyAction::Up),
                (&k.down, KeyAction::Down),
                (&k.page_up, KeyAction::PageUp),
                (&k.page_down, KeyAction::PageDown),
                (&k.first, KeyAction::First),
                (&k.last, KeyAction::Last),
                (&k.clear_search, KeyAction::ClearSearch),
                (&k.delete_word, KeyAction::DeleteWord),
                (&k.clear_value, KeyAction::ClearValue),
            ]
        } else {
            vec![
                (&k.open, KeyAction::Open),
                (&k.clear_value, KeyAction::ClearValue),
            ]
        };
        table
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| action)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if key.kind != KeyEventKind::Press || !self.focus {
            return Command::none();
        }
        let action = self.key_action(&key);
        if !self.open {
            return match (action, key.code) {
                (Some(KeyAction::Open), _) => {
                    self.open_popup(None);
                    Command::none()
                }
                (Some(KeyAction::ClearValue), _) => self.clear(),
                (_, KeyCode::Backspace | KeyCode::Delete) if key.modifiers.is_empty() => {
                    self.clear()
                }
                (_, KeyCode::Char(c)) if is_text_input(&key) => {
                    self.open_popup(None);
                    self.edit(|s| s.insert_char(c));
                    Command::none()
                }
                _ => Command::none(),
            };
        }

        match action {
            Some(KeyAction::Close) => self.close_popup(),
            Some(KeyAction::Select) => return self.pick(self.selection.cursor()),
            Some(KeyAction::Up) => self.navigate(SelectionState::move_up),
            Some(KeyAction::Down) => self.navigate(SelectionState::move_down),
            Some(KeyAction::PageUp) => self.navigate(SelectionState::page_up),
            Some(KeyAction::PageDown) => self.navigate(SelectionState::page_down),
            Some(KeyAction::First) => self.navigate(SelectionState::home),
            Some(KeyAction::Last) => self.navigate(SelectionState::end),
            Some(KeyAction::ClearSearch) => self.edit(SearchText::clear),
            Some(KeyAction::DeleteWord) => self.edit(SearchText::delete_word_back),
            Some(KeyAction::ClearValue) => return self.clear(),
            Some(KeyAction::Open) => {}
            None => match key.code {
                KeyCode::Backspace => self.edit(SearchText::delete_back),
                KeyCode::Delete => self.edit(SearchText::delete_forward),
                KeyCode::Left => self.search.move_left(),
                KeyCode::Right => self.search.move_right(),
                KeyCode::Home => self.search.move_home(),
                KeyCode::End => self.search.move_end(),
                KeyCode::Char(c) if is_text_input(&key) => self.edit(|s| s.insert_char(c)),
                _ => {}
            },
        }
        Command::none()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        let over_popup = self.popup_contains(&mouse);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse),
            MouseEventKind::ScrollDown if over_popup => {
                self.scroll_list(1);
                Command::none()
            }
            MouseEventKind::ScrollUp if over_popup => {
                self.scroll_list(-1);
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn click(&mut self, mouse: MouseEvent) -> Command<Message> {
        let trigger = self.trigger_area.get();
        if hits(trigger, &mouse) {
            let layout = TriggerLayout::new(trigger, self.shows_clear());
            if layout.clear.is_some_and(|r| hits(r, &mouse)) {
                return self.clear();
            }
            if hits(layout.chevron, &mouse) {
                self.toggle(Some(mouse));
            } else {
                self.open_popup(Some(mouse));
            }
            return Command::none();
        }
        let list = self.list_area.get();
        if self.open && hits(list, &mouse) {
            let row = usize::from(mouse.row - list.y);
            return self.pick(self.selection.offset() + row);
        }
        Command::none()
    }

    fn dismiss_if_outside(&mut self, mouse: MouseEvent) {
        if !self.open {
            return;
        }
        // The press that opened the select may reach this listener too. The
        // guard is spent by the first press either way; a listener started
        // after the opening press never sees it.
        if self.opened_by.take() == Some(mouse) {
            return;
        }
        if self.contains(&mouse) {
            return;
        }
        tracing::debug!(select = %self.id, column = mouse.column, row = mouse.row, "dismissed by outside click");
        self.close_popup();
    }

    fn more_hint(&self) -> Option<String> {
        let shown = self.window_len();
        let total = self.filtered.len();
        (self.search.is_empty() && shown < total).then(|| self.texts.more_hint(shown, total))
    }

    fn input_line(&self, width: usize) -> Line<'_> {
        let text_style = if self.disabled {
            self.style.text.add_modifier(Modifier::DIM)
        } else {
            self.style.text
        };
        if !self.open {
            return match self.selected_label() {
                Some(label) => Line::from(Span::styled(truncate(label, width, "…"), text_style)),
                None => Line::from(Span::styled(
                    truncate(&self.texts.placeholder, width, "…"),
                    self.style.placeholder,
                )),
            };
        }
        if self.search.is_empty() {
            return Line::from(vec![
                Span::styled(" ", self.style.cursor),
                Span::styled(self.texts.search_placeholder.as_str(), self.style.placeholder),
            ]);
        }
        let chars: Vec<char> = self.search.value().chars().collect();
        let cursor = self.search.cursor();
        let start = (cursor + 1).saturating_sub(width.max(1));
        let before: String = chars[start..cursor].iter().collect();
        let at: String = chars.get(cursor).map_or(" ".to_string(), char::to_string);
        let after: String = chars.get(cursor + 1..).unwrap_or_default().iter().collect();
        Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(at, self.style.cursor),
            Span::styled(after, text_style),
        ])
    }

    fn render_popup(&self, frame: &mut Frame, anchor: Rect) {
        let window = self.window_len();
        let hint = self.more_hint();
        let rows = window.clamp(1, self.max_rows) as u16;
        let wanted = rows + 2 + u16::from(hint.is_some());

        let screen = frame.area();
        let below = screen.bottom().saturating_sub(anchor.bottom());
        let above = anchor.top().saturating_sub(screen.top());
        let popup = if below >= wanted || below >= above {
            Rect::new(anchor.x, anchor.bottom(), anchor.width, wanted.min(below))
        } else {
            let height = wanted.min(above);
            Rect::new(anchor.x, anchor.y - height, anchor.width, height)
        };
        if popup.height < 3 || popup.width < 4 {
            self.popup_area.set(Rect::default());
            self.list_area.set(Rect::default());
            return;
        }
        self.popup_area.set(popup);

        frame.render_widget(Clear, popup);
        let block = Block::new()
            .borders(Borders::ALL)
            .border_style(self.style.popup_border);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let (list, footer) = match hint {
            Some(hint) if inner.height >= 2 => {
                let list = Rect {
                    height: inner.height - 1,
                    ..inner
                };
                let footer = Rect {
                    y: inner.bottom() - 1,
                    height: 1,
                    ..inner
                };
                (list, Some((footer, hint)))
            }
            _ => (inner, None),
        };
        self.list_area.set(list);

        if window == 0 {
            let text = truncate(&self.texts.no_options, list.width as usize, "…");
            frame.render_widget(
                Paragraph::new(Span::styled(text, self.style.empty)),
                Rect { height: 1, ..list },
            );
        }

        // Keep the highlight on screen even before the next update syncs.
        let mut selection = self.selection.clone();
        selection.set_visible(usize::from(list.height));
        let offset = selection.offset();
        let label_width = (list.width as usize).saturating_sub(HIGHLIGHT_SYMBOL.chars().count());
        for (row, pos) in (offset..window).take(list.height as usize).enumerate() {
            let Some(entry) = self.entry_at(pos) else {
                break;
            };
            let highlighted = pos == selection.cursor();
            let mut style = if highlighted {
                self.style.highlighted
            } else {
                self.style.item
            };
            if self.value != 0 && entry.value == self.value {
                style = style.patch(self.style.chosen);
            }
            let prefix = if highlighted { HIGHLIGHT_SYMBOL } else { "  " };
            let text = format!("{prefix}{}", truncate(&entry.display, label_width, "…"));
            let row_area = Rect {
                y: list.y + row as u16,
                height: 1,
                ..list
            };
            frame.render_widget(Paragraph::new(Span::styled(text, style)), row_area);
        }

        if let Some((footer, hint)) = footer {
            let text = truncate(&hint, footer.width as usize, "…");
            frame.render_widget(Paragraph::new(Span::styled(text, self.style.hint)), footer);
        }
    }
}

fn is_text_input(key: &KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl<T: Send + 'static> Component for SearchableSelect<T> {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        self.sync_viewport();
        if self.disabled {
            if msg == Message::Blur {
                self.focus = false;
            }
            return Command::none();
        }
        match msg {
            Message::KeyPress(key) => self.handle_key(key),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::PointerDown(mouse) => {
                self.dismiss_if_outside(mouse);
                Command::none()
            }
            Message::Focus => {
                self.focus = true;
                self.open_popup(None);
                Command::none()
            }
            Message::Blur => {
                self.focus = false;
                if self.open {
                    self.close_popup();
                }
                Command::none()
            }
            Message::Toggle => {
                self.toggle(None);
                Command::none()
            }
            Message::Paste(text) => {
                if self.focus {
                    self.open_popup(None);
                    self.edit(|s| s.insert_str(&text) > 0);
                }
                Command::none()
            }
            Message::ScrollList(delta) => {
                self.scroll_list(delta);
                Command::none()
            }
            Message::Pick(pos) => self.pick(pos),
            Message::Clear => self.clear(),
            Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.trigger_area.set(area);
        if !self.open {
            self.popup_area.set(Rect::default());
            self.list_area.set(Rect::default());
        }

        let title = match (self.label.is_empty(), self.required) {
            (true, _) => String::new(),
            (false, true) => format!(" {} * ", self.label),
            (false, false) => format!(" {} ", self.label),
        };
        let invalid = self.show_errors && !self.is_valid();
        let block = field_block(&title, self.focus || self.open, self.disabled, invalid);
        frame.render_widget(block, area);

        let layout = TriggerLayout::new(area, self.shows_clear());
        frame.render_widget(
            Paragraph::new(self.input_line(layout.text.width as usize)),
            layout.text,
        );
        if let Some(clear) = layout.clear {
            frame.render_widget(Paragraph::new(Span::styled(CLEAR_GLYPH, self.style.glyph)), clear);
        }
        let chevron = if self.open { CHEVRON_OPEN } else { CHEVRON_CLOSED };
        frame.render_widget(
            Paragraph::new(Span::styled(chevron, self.style.glyph)),
            layout.chevron,
        );

        if self.open {
            self.render_popup(frame, area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.open && !self.disabled {
            vec![pointer_events(&self.id, Message::PointerDown)]
        } else {
            vec![]
        }
    }

    fn focused(&self) -> bool {
        self.focus || self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use plaza_core::testing::buffer_to_string;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    const TRIGGER: Rect = Rect {
        x: 0,
        y: 0,
        width: 30,
        height: 3,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn press(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn numbered(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::with_id(i as i64).with("name", format!("Centro {i:02}")))
            .collect()
    }

    fn cost_centers() -> Vec<Record> {
        vec![
            Record::with_id(1).with("name", "Úrsula Pérez"),
            Record::with_id(2).with("name", "Ventas Norte"),
            Record::with_id(3).with("name", "Ana Gómez"),
            Record::with_id(4).with("name", "ventas sur"),
            Record::with_id(5).with("name", "Ñuñoa"),
            Record::with_id(6).with("name", "Nogales"),
        ]
    }

    fn labels<T: Send + 'static>(select: &SearchableSelect<T>) -> Vec<String> {
        select
            .visible_options()
            .into_iter()
            .map(|e| e.display.clone())
            .collect()
    }

    fn type_text<T: Send + 'static>(select: &mut SearchableSelect<T>, text: &str) {
        for c in text.chars() {
            select.update(Message::KeyPress(key(KeyCode::Char(c))));
        }
    }

    fn render<T: Send + 'static>(select: &SearchableSelect<T>) -> String {
        render_on(select, 30, 16)
    }

    fn render_on<T: Send + 'static>(select: &SearchableSelect<T>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| select.view(f, TRIGGER)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn opened(options: Vec<Record>) -> SearchableSelect {
        let mut select = SearchableSelect::records(options);
        select.update(Message::Focus);
        select
    }

    #[test]
    fn starts_closed_with_no_value() {
        let select = SearchableSelect::records(cost_centers());
        assert_eq!(select.state(), SelectState::Closed);
        assert_eq!(select.value(), 0);
        assert_eq!(select.input_text(), "");
        assert!(select.subscriptions().is_empty());
    }

    #[test]
    fn closed_input_shows_selected_option() {
        let mut select = SearchableSelect::records(cost_centers()).with_value(3);
        assert_eq!(select.input_text(), "Ana Gómez");
        select.set_value(42);
        assert_eq!(select.input_text(), "");
    }

    #[test]
    fn focus_opens_in_browse_mode() {
        let select = opened(cost_centers());
        assert_eq!(select.state(), SelectState::Browse);
        assert_eq!(select.search_term(), "");
        assert_eq!(select.subscriptions().len(), 1);
    }

    #[test]
    fn browse_lists_options_in_spanish_order() {
        let select = opened(cost_centers());
        assert_eq!(
            labels(&select),
            vec!["Ana Gómez", "Nogales", "Ñuñoa", "Úrsula Pérez", "Ventas Norte", "ventas sur"]
        );
    }

    #[test]
    fn typing_filters_case_insensitively() {
        let mut select = opened(cost_centers());
        type_text(&mut select, "VENTAS");
        assert_eq!(select.state(), SelectState::Search);
        assert_eq!(labels(&select), vec!["Ventas Norte", "ventas sur"]);
    }

    #[test]
    fn typing_while_closed_opens_and_searches() {
        let mut select = SearchableSelect::records(cost_centers());
        select.update(Message::Focus);
        select.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(!select.is_open());

        type_text(&mut select, "ñ");
        assert_eq!(select.state(), SelectState::Search);
        assert_eq!(labels(&select), vec!["Ñuñoa"]);
    }

    #[test]
    fn search_mode_lists_every_match() {
        let mut select = opened(numbered(25));
        assert_eq!(select.visible_count(), 10);

        type_text(&mut select, "centro");
        assert_eq!(select.visible_count(), 25);
        select.update(Message::ScrollList(100));
        assert_eq!(select.visible_count(), 25);
    }

    #[test]
    fn scrolling_reveals_pages_until_exhausted() {
        let mut select = opened(numbered(25));
        assert_eq!(select.visible_count(), 10);

        select.update(Message::ScrollList(100));
        assert_eq!(select.visible_count(), 20);
        select.update(Message::ScrollList(100));
        assert_eq!(select.visible_count(), 25);
        select.update(Message::ScrollList(100));
        assert_eq!(select.visible_count(), 25);
    }

    #[test]
    fn scroll_far_from_bottom_reveals_nothing() {
        let mut select = opened(numbered(40)).with_initial_visible_count(20);
        select.update(Message::ScrollList(1));
        assert_eq!(select.visible_count(), 20);
    }

    #[test]
    fn keyboard_scrolling_reveals_more() {
        let mut select = opened(numbered(25));
        for _ in 0..9 {
            select.update(Message::KeyPress(key(KeyCode::Down)));
        }
        assert_eq!(select.visible_count(), 20);
        assert_eq!(select.highlighted().map(|e| e.value), Some(10));
    }

    #[test]
    fn emptying_search_resets_window() {
        let mut select = opened(numbered(25));
        select.update(Message::ScrollList(100));
        assert_eq!(select.visible_count(), 20);

        type_text(&mut select, "1");
        select.update(Message::KeyPress(key(KeyCode::Backspace)));
        assert_eq!(select.state(), SelectState::Browse);
        assert_eq!(select.visible_count(), 10);
    }

    #[test]
    fn ctrl_u_clears_search_term() {
        let mut select = opened(cost_centers());
        type_text(&mut select, "ven");
        select.update(Message::KeyPress(ctrl('u')));
        assert_eq!(select.search_term(), "");
        assert_eq!(select.state(), SelectState::Browse);
    }

    #[test]
    fn enter_chooses_highlighted_option() {
        let mut select = opened(cost_centers());
        type_text(&mut select, "sur");
        let cmd = select.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(4)));
        assert_eq!(select.state(), SelectState::Closed);
        assert_eq!(select.search_term(), "");
        assert!(select.subscriptions().is_empty());
    }

    #[test]
    fn picking_resets_window() {
        let mut select = opened(numbered(25));
        select.update(Message::ScrollList(100));
        let cmd = select.update(Message::Pick(15));
        assert_eq!(cmd.into_message(), Some(Message::Changed(16)));
        select.update(Message::Focus);
        assert_eq!(select.visible_count(), 10);
    }

    #[test]
    fn pick_outside_window_is_ignored() {
        let mut select = opened(numbered(25));
        assert!(select.update(Message::Pick(12)).is_none());
        assert!(select.is_open());
    }

    #[test]
    fn reopening_highlights_current_value() {
        let mut select = SearchableSelect::records(cost_centers()).with_value(6);
        select.update(Message::Focus);
        assert_eq!(select.highlighted().map(|e| e.value), Some(6));
    }

    #[test]
    fn esc_closes_without_change() {
        let mut select = opened(cost_centers());
        type_text(&mut select, "ana");
        let cmd = select.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(cmd.is_none());
        assert_eq!(select.state(), SelectState::Closed);
        assert_eq!(select.search_term(), "");
    }

    #[test]
    fn clear_reports_zero_and_keeps_open_state() {
        let mut select = opened(cost_centers()).with_value(2);
        type_text(&mut select, "ven");
        let cmd = select.update(Message::Clear);
        assert_eq!(cmd.into_message(), Some(Message::Changed(0)));
        assert!(select.is_open());
        assert_eq!(select.search_term(), "");

        let mut closed = SearchableSelect::records(cost_centers()).with_value(2);
        assert_eq!(closed.update(Message::Clear).into_message(), Some(Message::Changed(0)));
        assert!(!closed.is_open());
    }

    #[test]
    fn clear_is_noop_without_value() {
        let mut select = opened(cost_centers());
        assert!(select.update(Message::Clear).is_none());
    }

    #[test]
    fn backspace_on_closed_field_clears_value() {
        let mut select = SearchableSelect::records(cost_centers()).with_value(5);
        select.update(Message::Focus);
        select.update(Message::KeyPress(key(KeyCode::Esc)));
        let cmd = select.update(Message::KeyPress(key(KeyCode::Backspace)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(0)));
    }

    #[test]
    fn disabled_ignores_everything() {
        let mut select = SearchableSelect::records(cost_centers())
            .with_value(2)
            .with_disabled(true);
        select.update(Message::Focus);
        assert!(!select.is_open());
        assert!(select.update(Message::Clear).is_none());
        assert!(select.update(Message::Toggle).is_none());
        assert!(select.subscriptions().is_empty());
        assert!(!render(&select).contains(CLEAR_GLYPH));
    }

    #[test]
    fn disabling_an_open_select_closes_it() {
        let mut select = opened(cost_centers());
        select.set_disabled(true);
        assert!(!select.is_open());
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut select = SearchableSelect::records(cost_centers());
        select.update(Message::Toggle);
        assert!(select.is_open());
        type_text(&mut select, "a");
        select.update(Message::Toggle);
        assert!(!select.is_open());
        assert_eq!(select.search_term(), "");
    }

    #[test]
    fn blur_closes() {
        let mut select = opened(cost_centers());
        select.update(Message::Blur);
        assert!(!select.is_open());
        assert!(!select.focused());
    }

    #[test]
    fn opening_click_does_not_dismiss() {
        let mut select = SearchableSelect::records(cost_centers());
        render(&select);
        let click = press(5, 1);
        select.update(Message::Mouse(click));
        assert!(select.is_open());
        render(&select);

        select.update(Message::PointerDown(click));
        assert!(select.is_open());

        select.update(Message::PointerDown(press(5, 1)));
        assert!(select.is_open(), "a later click on the trigger is inside");
        select.update(Message::PointerDown(press(5, 5)));
        assert!(select.is_open(), "a click in the popup is inside");

        select.update(Message::PointerDown(press(29, 15)));
        assert!(!select.is_open());
    }

    #[test]
    fn outside_click_closes_and_resets() {
        let mut select = opened(numbered(25));
        render(&select);
        select.update(Message::ScrollList(100));
        type_text(&mut select, "0");

        select.update(Message::PointerDown(press(29, 15)));
        assert_eq!(select.state(), SelectState::Closed);
        assert_eq!(select.search_term(), "");
        select.update(Message::Focus);
        assert_eq!(select.visible_count(), 10);
    }

    #[test]
    fn clicking_a_row_chooses_it() {
        let mut select = opened(cost_centers());
        render(&select);
        // Popup border at row 3, first option at row 4.
        let cmd = select.update(Message::Mouse(press(4, 5)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(6)));
    }

    #[test]
    fn clicking_clear_glyph_clears() {
        let mut select = SearchableSelect::records(cost_centers()).with_value(1);
        render(&select);
        let cmd = select.update(Message::Mouse(press(26, 1)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(0)));
        assert!(!select.is_open());
    }

    #[test]
    fn chevron_toggles() {
        let mut select = SearchableSelect::records(cost_centers());
        render(&select);
        select.update(Message::Mouse(press(28, 1)));
        assert!(select.is_open());
        render(&select);
        select.update(Message::Mouse(press(28, 1)));
        assert!(!select.is_open());
    }

    #[test]
    fn wheel_over_popup_reveals_more() {
        let mut select = opened(numbered(25));
        render(&select);
        for _ in 0..2 {
            select.update(Message::Mouse(mouse(MouseEventKind::ScrollDown, 5, 6)));
        }
        assert_eq!(select.visible_count(), 20);
    }

    #[test]
    fn wheel_up_at_top_reveals_nothing() {
        let mut select = opened(numbered(25));
        render(&select);
        select.update(Message::Mouse(mouse(MouseEventKind::ScrollUp, 5, 6)));
        assert_eq!(select.visible_count(), 10);
        select.update(Message::ScrollList(0));
        assert_eq!(select.visible_count(), 10);
        assert_eq!(select.highlighted().map(|e| e.value), Some(1));
    }

    #[test]
    fn short_window_reveals_on_wheel_down() {
        let mut select = SearchableSelect::records(numbered(25)).with_initial_visible_count(5);
        select.update(Message::Focus);
        render(&select);
        select.update(Message::Mouse(mouse(MouseEventKind::ScrollDown, 5, 6)));
        assert_eq!(select.visible_count(), 15);
    }

    #[test]
    fn squeezed_popup_keeps_highlight_on_screen() {
        let mut select = opened(numbered(25));
        for _ in 0..5 {
            select.update(Message::KeyPress(key(KeyCode::Down)));
        }
        // Room for three option rows under the trigger.
        let screen = render_on(&select, 30, 9);
        assert!(screen.contains("▸ Centro 06"), "{screen}");
        assert!(!screen.contains("Centro 03"));

        select.update(Message::KeyPress(key(KeyCode::Down)));
        let screen = render_on(&select, 30, 9);
        assert!(screen.contains("▸ Centro 07"), "{screen}");
        assert!(!screen.contains("Centro 04"));

        let cmd = select.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(7)));
    }

    #[test]
    fn squeezed_popup_reveals_near_its_own_bottom() {
        let mut select = opened(numbered(25));
        render_on(&select, 30, 9);
        for _ in 0..6 {
            select.update(Message::KeyPress(key(KeyCode::Down)));
        }
        assert_eq!(select.visible_count(), 10);
        select.update(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(select.visible_count(), 20);
    }

    #[test]
    fn clicks_on_squeezed_rows_pick_what_is_shown() {
        let mut select = opened(numbered(25));
        for _ in 0..5 {
            select.update(Message::KeyPress(key(KeyCode::Down)));
        }
        render_on(&select, 30, 9);
        // First option row sits under the popup border at row 3.
        let cmd = select.update(Message::Mouse(press(5, 4)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(4)));
    }

    #[test]
    fn popup_contains_only_while_open() {
        let mut select = opened(cost_centers());
        render(&select);
        assert!(select.popup_contains(&press(5, 5)));
        assert!(select.contains(&press(5, 1)));
        assert!(!select.contains(&press(29, 15)));

        select.update(Message::Blur);
        assert!(!select.popup_contains(&press(5, 5)));
        assert!(select.contains(&press(5, 1)));
    }

    #[test]
    fn opening_guard_is_spent_by_first_press() {
        let mut select = SearchableSelect::records(cost_centers());
        render(&select);
        select.update(Message::Mouse(press(5, 1)));
        render(&select);

        // The listener started after the opening press, so the first press it
        // sees is a new one.
        select.update(Message::PointerDown(press(5, 5)));
        assert!(select.is_open());
        select.update(Message::PointerDown(press(29, 15)));
        assert!(!select.is_open());
    }

    #[test]
    fn views_rederive_identically_from_same_inputs() {
        let options = || {
            let mut options = cost_centers();
            options.push(Record::with_id(7).with("name", "VENTAS NORTE"));
            options.extend((10..30).map(|i| Record::with_id(i).with("name", format!("Centro {i}"))));
            options
        };
        let build = || {
            let mut select = SearchableSelect::records(options()).with_initial_visible_count(5);
            select.update(Message::Focus);
            select
        };
        let mut first = build();
        let mut second = build();
        assert_eq!(first.visible_options(), second.visible_options());

        first.update(Message::ScrollList(100));
        second.update(Message::ScrollList(100));
        assert_eq!(first.visible_count(), 15);
        assert_eq!(first.visible_options(), second.visible_options());

        type_text(&mut first, "ventas");
        type_text(&mut second, "ventas");
        assert_eq!(labels(&first), vec!["Ventas Norte", "VENTAS NORTE", "ventas sur"]);
        assert_eq!(first.visible_options(), second.visible_options());

        first.set_options(options());
        assert_eq!(first.visible_options(), second.visible_options());

        first.update(Message::KeyPress(ctrl('u')));
        second.set_options(options());
        second.update(Message::KeyPress(ctrl('u')));
        assert_eq!(first.visible_count(), 5);
        assert_eq!(first.visible_options(), second.visible_options());
    }

    #[test]
    fn renders_empty_state() {
        let mut select = opened(cost_centers());
        type_text(&mut select, "zzz");
        assert!(render(&select).contains("No options found"));
    }

    #[test]
    fn renders_pagination_hint_only_while_browsing() {
        let mut select = opened(numbered(25));
        assert!(render(&select).contains("10 of 25 · scroll for more"));

        type_text(&mut select, "2");
        assert!(!render(&select).contains("scroll for more"));
    }

    #[test]
    fn renders_label_and_selection() {
        let select = SearchableSelect::records(cost_centers())
            .with_label("Cost center")
            .with_required(true)
            .with_value(3);
        let screen = render(&select);
        assert!(screen.contains("Cost center *"));
        assert!(screen.contains("Ana Gómez"));
        assert!(screen.contains(CLEAR_GLYPH));
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let select = SearchableSelect::records(cost_centers()).with_placeholder("Pick one");
        assert!(render(&select).contains("Pick one"));
    }

    #[test]
    fn required_validity() {
        let mut select = SearchableSelect::records(cost_centers()).with_required(true);
        assert!(!select.is_valid());
        select.set_value(1);
        assert!(select.is_valid());
        assert!(SearchableSelect::records(vec![]).is_valid());
    }

    #[test]
    fn set_options_keeps_search_term() {
        let mut select = opened(cost_centers());
        type_text(&mut select, "ventas");
        select.set_options(numbered(3));
        assert_eq!(select.search_term(), "ventas");
        assert!(select.visible_options().is_empty());

        select.set_options(cost_centers());
        assert_eq!(select.match_count(), 2);
    }

    #[test]
    fn set_resolver_reindexes() {
        let records = vec![
            Record::with_id(1).with("name", "Sales").with("nombre", "Ventas"),
            Record::with_id(2).with("name", "Purchasing").with("nombre", "Compras"),
        ];
        let mut select = SearchableSelect::records(records).with_value(1);
        assert_eq!(select.input_text(), "Sales");
        select.set_resolver(FieldResolver::new().with_display_field("nombre"));
        assert_eq!(select.input_text(), "Ventas");
    }

    #[test]
    fn paste_opens_and_searches() {
        let mut select = SearchableSelect::records(cost_centers());
        select.update(Message::Focus);
        select.update(Message::KeyPress(key(KeyCode::Esc)));
        select.update(Message::Paste("norte".into()));
        assert_eq!(labels(&select), vec!["Ventas Norte"]);
    }

    #[test]
    fn subscription_is_keyed_by_id() {
        let a = opened(cost_centers()).with_id("cost-center");
        let b = opened(cost_centers()).with_id("cost-center");
        assert_eq!(a.subscriptions()[0].id(), b.subscriptions()[0].id());
    }

    struct Account {
        id: i64,
        number: &'static str,
    }

    impl SelectItem for Account {
        fn label(&self) -> std::borrow::Cow<'_, str> {
            self.number.into()
        }
        fn value(&self) -> i64 {
            self.id
        }
    }

    #[test]
    fn typed_options_work_through_select_item() {
        let mut select = SearchableSelect::items(vec![
            Account { id: 7, number: "6100-02" },
            Account { id: 8, number: "6100-01" },
        ]);
        select.update(Message::Focus);
        assert_eq!(labels(&select), vec!["6100-01", "6100-02"]);
        let cmd = select.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cmd.into_message(), Some(Message::Changed(8)));
    }
}
