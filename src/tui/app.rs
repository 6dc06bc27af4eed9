use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;

use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::kv::{FileKv, KeyValueStore};
use crate::io::persistence;
use crate::logging;
use crate::model::{AppConfig, List, ThemeMode};
use crate::notify::{Notifier, NotifyKind};
use crate::ops::list_ops::{Change, ListError, ListStore};
use crate::ops::search;

use super::input;
use super::render;
use super::reorder::ReorderResolver;
use super::session::{Commit, EditSessions, Field};
use super::text_input::TextInput;
use super::theme::Theme;
use super::toast::Toasts;
use super::view::{ViewModel, build_view};

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing in the search bar; the filter applies live
    Search,
    /// An inline edit session has keyboard focus
    Edit,
    /// Typing a new item into a card's add row
    Add,
    /// New-list popup
    NewList,
    /// Keyboard reorder of the card under the cursor
    Move,
    Confirm,
}

/// Row of a card the cursor can rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Title,
    Item(usize),
    /// The "+ add name" row at the bottom of each card
    Add,
}

/// Keyboard cursor, anchored to a list id so it survives rebuilds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub list_id: Option<String>,
    pub row: Row,
}

/// Destructive actions waiting for y/n
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteList { list_id: String },
    ClearAll,
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

/// Add-item input on one card
#[derive(Debug, Clone)]
pub struct AddInput {
    pub list_id: String,
    pub input: TextInput,
}

/// Which field of the new-list popup has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Items,
}

/// New-list popup: a title and one initial item per line
#[derive(Debug, Clone)]
pub struct NewListForm {
    pub title: TextInput,
    pub lines: Vec<TextInput>,
    pub line: usize,
    pub field: FormField,
}

impl Default for NewListForm {
    fn default() -> Self {
        NewListForm {
            title: TextInput::new(),
            lines: vec![TextInput::new()],
            line: 0,
            field: FormField::Title,
        }
    }
}

impl NewListForm {
    pub fn items_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Something clickable, recorded while drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Title { list_id: String },
    Item { list_id: String, index: usize },
    DeleteItem { list_id: String, index: usize },
    DeleteList { list_id: String },
    AddRow { list_id: String },
    /// Whole card outline (drag source / drop target)
    Card { list_id: String },
    /// Empty space in the card column
    ListArea,
    SearchBar,
}

impl Hit {
    /// The editable field this hit refers to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            Hit::Title { list_id } => Some(Field::Title {
                list_id: list_id.clone(),
            }),
            Hit::Item { list_id, index } => Some(Field::Item {
                list_id: list_id.clone(),
                index: *index,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HitRegion {
    pub rect: Rect,
    pub hit: Hit,
}

/// Left button held on a card, not yet a drag
#[derive(Debug, Clone)]
pub struct Press {
    pub list_id: String,
    pub row: u16,
}

/// Main application state
pub struct App {
    pub store: ListStore<Box<dyn KeyValueStore>>,
    pub config: AppConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Derived view; replaced wholesale by `resync`
    pub view: ViewModel,
    pub cursor: Cursor,
    /// First visible row of the card column
    pub scroll: usize,
    /// Scroll so the cursor row stays on screen (off after wheel scrolling)
    pub follow_cursor: bool,
    /// Live filter text
    pub search_input: TextInput,
    pub sessions: EditSessions,
    pub reorder: ReorderResolver,
    pub add_input: Option<AddInput>,
    pub new_list: Option<NewListForm>,
    pub confirm_state: Option<ConfirmState>,
    pub toasts: Toasts,
    pub show_key_hints: bool,
    /// Clickable regions from the last draw, topmost last
    pub hits: Vec<HitRegion>,
    pub press: Option<Press>,
    pub last_click: Option<(Hit, Instant)>,
    /// Where `E` writes exports
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(kv: Box<dyn KeyValueStore>, config: AppConfig) -> Self {
        let store = ListStore::open(kv);
        let mode = persistence::load_theme(store.kv());
        let theme = Theme::for_mode(mode, &config.ui);
        let toasts = Toasts::new(Duration::from_millis(config.ui.toast_ms));
        let show_key_hints = config.ui.show_key_hints;
        let mut app = App {
            store,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            view: ViewModel::default(),
            cursor: Cursor {
                list_id: None,
                row: Row::Title,
            },
            scroll: 0,
            follow_cursor: true,
            search_input: TextInput::new(),
            sessions: EditSessions::new(),
            reorder: ReorderResolver::new(),
            add_input: None,
            new_list: None,
            confirm_state: None,
            toasts,
            show_key_hints,
            hits: Vec::new(),
            press: None,
            last_click: None,
            export_dir: PathBuf::from("."),
        };
        app.resync();
        app
    }

    /// Current filter query as typed
    pub fn query(&self) -> &str {
        self.search_input.text()
    }

    /// Case-insensitive matcher for highlighting, if a filter is active
    pub fn active_search_re(&self) -> Option<Regex> {
        search::highlight_regex(self.query())
    }

    pub fn list(&self, list_id: &str) -> Option<&List> {
        self.store.snapshot().find(list_id)
    }

    /// Rebuild the view from the store. Every open edit session is discarded,
    /// whether or not it belongs to the list that changed.
    pub fn resync(&mut self) {
        let discarded = self.sessions.discard_all();
        if discarded > 0 {
            debug!(
                "event=edit_discarded module=tui reason=rebuild sessions={}",
                discarded
            );
        }
        if self.mode == Mode::Edit {
            self.mode = Mode::Navigate;
        }
        if self.mode == Mode::Add {
            self.mode = Mode::Navigate;
        }
        self.add_input = None;
        let old_index = self
            .cursor
            .list_id
            .as_deref()
            .and_then(|id| self.view.cards.iter().position(|c| c.list_id == id));
        let epoch = self.view.epoch + 1;
        self.view = build_view(self.store.snapshot(), self.query(), &self.reorder, epoch);
        self.clamp_cursor(old_index);
    }

    /// Report the outcome of a store call and rebuild the view
    pub fn finish(&mut self, result: Result<Change, ListError>, success: &str) -> bool {
        let applied = match result {
            Ok(Change::Applied) => {
                self.toasts.notify(success, NotifyKind::Success);
                true
            }
            Ok(Change::Unchanged) => false,
            Err(e) => {
                self.report_error(&e);
                false
            }
        };
        self.resync();
        applied
    }

    pub fn report_error(&mut self, e: &ListError) {
        warn!("event=mutation module=tui status=error error={}", e);
        let message = match e {
            ListError::Persistence(_) => format!("Save failed: {}", e),
            _ => e.to_string(),
        };
        self.toasts.notify(&message, NotifyKind::Error);
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    /// Keep the cursor on a visible card and an existing row. `old_index` is
    /// the cursor card's position in the previous view.
    fn clamp_cursor(&mut self, old_index: Option<usize>) {
        let current = self
            .cursor
            .list_id
            .as_deref()
            .and_then(|id| self.view.card(id))
            .filter(|c| !c.hidden)
            .map(|c| (c.list_id.clone(), c.items.len()));

        let (list_id, len) = match current {
            Some(found) => found,
            None => {
                // Nearest visible card at or after the old position
                let next = match old_index {
                    Some(p) => self
                        .view
                        .cards
                        .iter()
                        .skip(p)
                        .find(|c| !c.hidden)
                        .or_else(|| self.view.visible().last()),
                    None => self.view.visible().next(),
                };
                match next {
                    Some(c) => (c.list_id.clone(), c.items.len()),
                    None => {
                        self.cursor = Cursor {
                            list_id: None,
                            row: Row::Title,
                        };
                        return;
                    }
                }
            }
        };

        let row = match self.cursor.row {
            Row::Item(_) if len == 0 => Row::Add,
            Row::Item(i) if i >= len => Row::Item(len - 1),
            row => row,
        };
        self.cursor = Cursor {
            list_id: Some(list_id),
            row,
        };
    }

    /// Flattened (list_id, row) stops over visible cards, in order
    pub fn cursor_stops(&self) -> Vec<(String, Row)> {
        let mut stops = Vec::new();
        for card in self.view.visible() {
            stops.push((card.list_id.clone(), Row::Title));
            for i in 0..card.items.len() {
                stops.push((card.list_id.clone(), Row::Item(i)));
            }
            stops.push((card.list_id.clone(), Row::Add));
        }
        stops
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let stops = self.cursor_stops();
        if stops.is_empty() {
            return;
        }
        let current = stops
            .iter()
            .position(|(id, row)| Some(id) == self.cursor.list_id.as_ref() && *row == self.cursor.row)
            .unwrap_or(0);
        let next = (current as i64 + delta as i64).clamp(0, stops.len() as i64 - 1) as usize;
        let (list_id, row) = stops[next].clone();
        self.cursor = Cursor {
            list_id: Some(list_id),
            row,
        };
        self.follow_cursor = true;
    }

    /// Jump to the title of the next/previous visible card
    pub fn move_card(&mut self, delta: i32) {
        let visible: Vec<String> = self.view.visible().map(|c| c.list_id.clone()).collect();
        if visible.is_empty() {
            return;
        }
        let current = self
            .cursor
            .list_id
            .as_ref()
            .and_then(|id| visible.iter().position(|v| v == id))
            .unwrap_or(0);
        let next = (current as i64 + delta as i64).clamp(0, visible.len() as i64 - 1) as usize;
        self.cursor = Cursor {
            list_id: Some(visible[next].clone()),
            row: Row::Title,
        };
        self.follow_cursor = true;
    }

    pub fn cursor_list_id(&self) -> Option<String> {
        self.cursor.list_id.clone()
    }

    /// The editable field under the cursor
    pub fn cursor_field(&self) -> Option<Field> {
        let list_id = self.cursor.list_id.clone()?;
        match self.cursor.row {
            Row::Title => Some(Field::Title { list_id }),
            Row::Item(index) => Some(Field::Item { list_id, index }),
            Row::Add => None,
        }
    }

    // -----------------------------------------------------------------------
    // Edit sessions
    // -----------------------------------------------------------------------

    /// Committed value of a field
    fn field_value(&self, field: &Field) -> Option<String> {
        let list = self.list(field.list_id())?;
        match field {
            Field::Title { .. } => Some(list.title.clone()),
            Field::Item { index, .. } => list.items.get(*index).cloned(),
        }
    }

    /// Open an edit session on `field`. If another field currently has focus,
    /// it loses focus first, which commits it (and rebuilds the view).
    pub fn begin_edit(&mut self, field: Field) {
        if self.sessions.is_open(&field) {
            return;
        }
        if let Some(focused) = self.sessions.focused_field().cloned() {
            self.commit_edit(&focused);
        }
        let Some(value) = self.field_value(&field) else {
            return;
        };
        self.cursor = Cursor {
            list_id: Some(field.list_id().to_string()),
            row: match field {
                Field::Title { .. } => Row::Title,
                Field::Item { index, .. } => Row::Item(index),
            },
        };
        if self.sessions.open(field, &value) {
            self.mode = Mode::Edit;
        }
    }

    /// Commit gesture (Enter or loss of focus)
    pub fn commit_edit(&mut self, field: &Field) {
        let Some(commit) = self.sessions.commit(field) else {
            return;
        };
        match commit {
            Commit::NoChange => self.resync(),
            Commit::Write(value) => {
                let result = match field {
                    Field::Title { list_id } => self.store.update_title(list_id, &value),
                    Field::Item { list_id, index } => {
                        self.store.update_item(list_id, *index, &value)
                    }
                };
                let message = match field {
                    Field::Title { .. } => "Title updated",
                    Field::Item { .. } => "Name updated",
                };
                self.finish(result, message);
            }
        }
    }

    /// Cancel gesture (Esc)
    pub fn cancel_edit(&mut self, field: &Field) {
        if self.sessions.cancel(field) {
            self.resync();
        }
    }

    /// Commit whatever has focus, if anything
    pub fn commit_focused(&mut self) {
        if let Some(field) = self.sessions.focused_field().cloned() {
            self.commit_edit(&field);
        }
    }

    // -----------------------------------------------------------------------
    // Store actions
    // -----------------------------------------------------------------------

    pub fn add_item(&mut self, list_id: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let result = self.store.add_item(list_id, text);
        self.finish(result, "Name added")
    }

    pub fn remove_item(&mut self, list_id: &str, index: usize) {
        let result = self.store.remove_item(list_id, index);
        self.finish(result, "Name deleted");
    }

    pub fn delete_list(&mut self, list_id: &str) {
        let result = self.store.delete_list(list_id);
        self.finish(result, "List removed");
    }

    pub fn clear_all(&mut self) {
        let result = self.store.reset();
        self.finish(result, "All lists cleared");
    }

    /// Submit the new-list form. On a blank title the form stays open with
    /// the title focused.
    pub fn submit_new_list(&mut self) {
        let Some(form) = self.new_list.take() else {
            return;
        };
        let items = crate::ops::list_ops::parse_item_lines(&form.items_text());
        match self.store.create_list(form.title.text(), items) {
            Ok(id) => {
                self.mode = Mode::Navigate;
                self.toasts.notify("List created", NotifyKind::Success);
                self.cursor = Cursor {
                    list_id: Some(id),
                    row: Row::Title,
                };
                self.resync();
            }
            Err(ListError::Validation(field)) => {
                let mut form = form;
                form.field = FormField::Title;
                self.new_list = Some(form);
                self.toasts
                    .notify(&format!("List {} is required", field), NotifyKind::Error);
            }
            Err(e) => {
                self.new_list = Some(form);
                self.report_error(&e);
            }
        }
    }

    /// Apply a finished drag
    pub fn finish_drag(&mut self) {
        match self.reorder.drop() {
            Some(drop) => {
                let result = self.store.reorder_list(&drop.list_id, drop.target_index);
                self.finish(result, "Order updated");
            }
            None => self.resync(),
        }
    }

    pub fn cancel_drag(&mut self) {
        self.reorder.cancel();
        self.resync();
    }

    pub fn toggle_theme(&mut self) {
        let next = self.theme.mode.toggled();
        if let Err(e) = persistence::save_theme(self.store.kv_mut(), next) {
            self.toasts
                .notify(&format!("Save failed: {}", e), NotifyKind::Error);
            return;
        }
        self.theme = Theme::for_mode(next, &self.config.ui);
        info!("event=theme_changed module=tui mode={}", next);
        self.toasts
            .notify(&format!("Theme: {}", next), NotifyKind::Info);
    }

    pub fn export(&mut self) {
        match crate::ops::export::export_to_dir(&self.export_dir, self.store.snapshot()) {
            Ok(path) => {
                info!("event=export module=tui status=ok path={}", path.display());
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.toasts
                    .notify(&format!("Lists exported to {}", name), NotifyKind::Success);
            }
            Err(e) => {
                warn!("event=export module=tui status=error error={}", e);
                self.toasts
                    .notify(&format!("Export failed: {}", e), NotifyKind::Error);
            }
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode
    }

    /// Topmost hit region under a screen position
    pub fn hit_at(&self, col: u16, row: u16) -> Option<&HitRegion> {
        self.hits.iter().rev().find(|h| inside_rect(h.rect, col, row))
    }

    /// Card outline under a screen position
    pub fn card_at(&self, col: u16, row: u16) -> Option<&HitRegion> {
        self.hits
            .iter()
            .rev()
            .find(|h| matches!(h.hit, Hit::Card { .. }) && inside_rect(h.rect, col, row))
    }
}

pub fn inside_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Run the TUI application
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(data_dir);
    let config = read_config(&data_dir)?;
    if config.log.enabled
        && let Err(e) = logging::init_logging(&config.log.level, &data_dir.join("logs"))
    {
        eprintln!("warning: logging disabled: {}", e);
    }
    info!(
        "event=tui_start module=tui data_dir={}",
        data_dir.display()
    );

    let mut app = App::new(Box::new(FileKv::new(&data_dir)), config);
    if let Ok(cwd) = std::env::current_dir() {
        app.export_dir = cwd;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    info!("event=tui_stop module=tui revision={}", app.store.revision());
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.toasts.prune(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
