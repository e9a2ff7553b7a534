use std::path::PathBuf;
use std::time::Instant;

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::error::ScriptError;
use crate::models::{FieldRef, TextRef, ToggleRef};
use crate::project::{Created, Project};
use crate::selection::Selection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormRow {
    Name,
    Archetype,
    Field(FieldRef),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub since: Instant,
}

/// One open creator window.
#[derive(Debug)]
pub struct App {
    pub selection: Selection,
    pub project: Project,
    pub selected_path: Option<PathBuf>,
    pub active_row: usize,
    pub row_scroll: usize,
    pub preview_scroll: u16,
    pub rows_area: Rect,
    pub status: Option<StatusMessage>,
    pub created: Option<Created>,
    pub should_quit: bool,
}

impl App {
    pub fn new(project: Project, selected_path: Option<PathBuf>) -> Self {
        Self {
            selection: Selection::new(),
            project,
            selected_path,
            active_row: 0,
            row_scroll: 0,
            preview_scroll: 0,
            rows_area: Rect::default(),
            status: None,
            created: None,
            should_quit: false,
        }
    }

    pub fn rows(&self) -> Vec<FormRow> {
        let mut rows = vec![FormRow::Name, FormRow::Archetype];
        rows.extend(self.selection.fields().into_iter().map(FormRow::Field));
        rows
    }

    pub fn active(&self) -> FormRow {
        self.rows()
            .get(self.active_row)
            .copied()
            .unwrap_or(FormRow::Name)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.create(),
            KeyCode::Tab | KeyCode::Down => self.move_row(1),
            KeyCode::BackTab | KeyCode::Up => self.move_row(-1),
            KeyCode::PageDown => self.preview_scroll = self.preview_scroll.saturating_add(5),
            KeyCode::PageUp => self.preview_scroll = self.preview_scroll.saturating_sub(5),
            KeyCode::Left => self.cycle_archetype(false),
            KeyCode::Right => self.cycle_archetype(true),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.copy_preview();
            }
            KeyCode::Char(' ') => self.on_space(),
            KeyCode::Char(ch) => self.push_char(ch),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(index) = self.index_from_mouse(mouse) {
            self.active_row = index;
            if let FormRow::Field(FieldRef::Toggle(field)) = self.active() {
                self.flip(field);
            }
        }
    }

    fn move_row(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let current = self.active_row as isize;
        self.active_row = (current + delta).rem_euclid(len as isize) as usize;
    }

    fn cycle_archetype(&mut self, forward: bool) {
        if self.active() != FormRow::Archetype {
            return;
        }
        let current = self.selection.archetype();
        let next = if forward { current.next() } else { current.prev() };
        self.selection.set_archetype(next);
        self.preview_scroll = 0;
    }

    fn on_space(&mut self) {
        match self.active() {
            FormRow::Field(FieldRef::Toggle(field)) => self.flip(field),
            _ => self.push_char(' '),
        }
    }

    fn flip(&mut self, field: ToggleRef) {
        let Some(state) = self.selection.toggle(field).map(|toggle| toggle.state) else {
            return;
        };
        if !self.selection.set_toggle(field, !state) {
            self.set_status("Option is disabled", StatusKind::Info);
        }
    }

    fn push_char(&mut self, ch: char) {
        match self.active() {
            FormRow::Name => {
                let mut name = self.selection.name().to_string();
                name.push(ch);
                self.selection.set_name(name);
            }
            FormRow::Field(FieldRef::Text(field)) => self.edit_text(field, |value| value.push(ch)),
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.active() {
            FormRow::Name => {
                let mut name = self.selection.name().to_string();
                name.pop();
                self.selection.set_name(name);
            }
            FormRow::Field(FieldRef::Text(field)) => self.edit_text(field, |value| {
                value.pop();
            }),
            _ => {}
        }
    }

    fn edit_text(&mut self, field: TextRef, edit: impl FnOnce(&mut String)) {
        let mut value = self.selection.text(field).to_string();
        edit(&mut value);
        if !self.selection.set_text(field, value) {
            self.set_status("Field is disabled", StatusKind::Info);
        }
    }

    fn create(&mut self) {
        match self
            .project
            .create_script(&self.selection, self.selected_path.as_deref())
        {
            Ok(created) => {
                info!(path = %created.script.display(), "script created, closing");
                self.created = Some(created);
                self.should_quit = true;
            }
            Err(err @ ScriptError::DuplicateName { .. }) => {
                self.set_status(&err.to_string(), StatusKind::Warning);
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                self.set_status(&err.to_string(), StatusKind::Error);
            }
        }
    }

    fn copy_preview(&mut self) {
        let text = self.selection.generated().to_string();
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(_) => self.set_status("Copied", StatusKind::Info),
            Err(err) => self.set_status(&format!("Copy failed: {err}"), StatusKind::Error),
        }
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            kind,
            since: Instant::now(),
        });
    }

    fn index_from_mouse(&self, mouse: MouseEvent) -> Option<usize> {
        let area = self.rows_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if mouse.column < area.x
            || mouse.column >= area.x + area.width
            || mouse.row < area.y
            || mouse.row >= area.y + area.height
        {
            return None;
        }
        let index = self.row_scroll + (mouse.row - area.y) as usize;
        if index >= self.rows().len() {
            return None;
        }
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Archetype;

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(Project::new("does-not-exist-root"), None)
    }

    #[test]
    fn typing_edits_the_name() {
        let mut app = app();
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('X'));
        assert_eq!(app.selection.name(), "NewScrip X");
        assert!(app.selection.generated().contains("public class NewScrip X :"));
    }

    #[test]
    fn arrows_cycle_archetype_on_its_row() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection.archetype(), Archetype::Behavior);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection.archetype(), Archetype::DataAsset);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selection.archetype(), Archetype::Custom);
    }

    #[test]
    fn space_flips_toggles_but_not_locked_ones() {
        let mut app = app();
        // Name, Archetype, None, Awake()
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.selection.options().behavior.none.state);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.selection.options().behavior.methods[0].state);
        assert!(app.status.is_some());
    }

    #[test]
    fn focus_wraps_around_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.active_row, app.rows().len() - 1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active(), FormRow::Name);
    }

    #[test]
    fn escape_quits_without_creating() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
        assert!(app.created.is_none());
    }

    #[test]
    fn duplicate_name_warns_and_keeps_state() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("NewScript.cs"), "").expect("existing script");
        let mut app = App::new(Project::new(dir.path()), None);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        let options = app.selection.options().clone();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Warning));
        assert!(!app.should_quit);
        assert!(app.created.is_none());
        assert_eq!(app.selection.name(), "NewScript");
        assert_eq!(app.selection.archetype(), Archetype::DataAsset);
        assert_eq!(app.selection.options(), &options);
    }

    #[test]
    fn failed_create_keeps_window_open() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(!app.should_quit);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
        assert_eq!(app.selection.name(), "NewScript");
    }
}
