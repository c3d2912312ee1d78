use std::sync::Arc;

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use super::actions::{command_for, Command};
use super::list::NoteList;
use super::state::{FilenameInput, Mode, NoteBuffer};
use crate::config::AppConfig;
use crate::listing::NoteListing;
use crate::storage::{VaultError, VaultStore};

// Outer margin of the main view: two columns on each side, one row above and below.
const MARGIN_WIDTH: u16 = 4;
const MARGIN_HEIGHT: u16 = 2;
// Rows taken by the header and the help/status lines.
const CHROME_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Routes every input event according to the active [`Mode`] and performs
/// the matching vault side effects.
pub struct ModeController {
    store: VaultStore,
    listing: NoteListing,
    mode: Mode,
    filename: FilenameInput,
    editor: NoteBuffer,
    list: NoteList,
    status: Option<String>,
}

impl ModeController {
    pub fn new(config: Arc<AppConfig>, store: VaultStore) -> Self {
        let listing = NoteListing::new(store.clone());
        let mut controller = Self {
            store,
            listing,
            mode: Mode::Idle,
            filename: FilenameInput::new(config.filename_char_limit),
            editor: NoteBuffer::new(),
            list: NoteList::new(),
            status: None,
        };
        controller.refresh_listing();
        controller
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn filename_input(&self) -> &FilenameInput {
        &self.filename
    }

    pub fn editor(&self) -> &NoteBuffer {
        &self.editor
    }

    pub fn list(&self) -> &NoteList {
        &self.list
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_event(&mut self, event: Event) -> Outcome {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => {
                self.resize(width, height);
                Outcome::Continue
            }
            _ => Outcome::Continue,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.list.set_size(
            width.saturating_sub(MARGIN_WIDTH),
            height.saturating_sub(MARGIN_HEIGHT + CHROME_HEIGHT),
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.kind != KeyEventKind::Press {
            return Outcome::Continue;
        }
        let Some(command) = command_for(&key) else {
            self.forward(key);
            return Outcome::Continue;
        };
        match command {
            Command::Quit => return self.quit(),
            Command::QuitKey => {
                if self.accepts_quit_key() {
                    return self.quit();
                }
                self.forward(key);
            }
            Command::NewNote => self.open_create_prompt(key),
            Command::Submit => self.submit(key),
            Command::Save => self.save(key),
            Command::ListNotes => self.enter_browsing(key),
            Command::Delete => self.delete_selected(key),
            Command::Cancel => self.cancel(key),
        }
        Outcome::Continue
    }

    /// Releases the open note, if any, without writing it.
    pub fn shutdown(&mut self) {
        if let Mode::Editing(handle) = std::mem::take(&mut self.mode) {
            tracing::info!(path = %handle.path().display(), "closing unsaved note on quit");
            self.editor.clear();
        }
        self.filename.blur();
    }

    fn quit(&mut self) -> Outcome {
        self.shutdown();
        Outcome::Quit
    }

    fn accepts_quit_key(&self) -> bool {
        match self.mode {
            Mode::Idle => true,
            Mode::Browsing => !self.list.is_filtering(),
            Mode::CreatePrompt | Mode::Editing(_) => false,
        }
    }

    fn forward(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::CreatePrompt => {
                self.filename.handle_key(key);
            }
            Mode::Editing(_) => {
                self.editor.handle_key(key);
            }
            Mode::Browsing => {
                self.list.handle_key(key);
            }
            Mode::Idle => {}
        }
    }

    fn open_create_prompt(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::CreatePrompt => self.forward(key),
            Mode::Editing(_) => self.reject_while_editing(),
            Mode::Idle | Mode::Browsing => {
                self.filename.clear();
                self.filename.focus();
                self.mode = Mode::CreatePrompt;
                self.set_status("Enter a file name and press enter");
            }
        }
    }

    fn enter_browsing(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Browsing => self.forward(key),
            Mode::Editing(_) => self.reject_while_editing(),
            Mode::Idle | Mode::CreatePrompt => {
                self.filename.clear();
                self.filename.blur();
                self.clear_status();
                self.list.clear_filter();
                self.refresh_listing();
                self.mode = Mode::Browsing;
            }
        }
    }

    fn submit(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::CreatePrompt => self.submit_filename(),
            Mode::Browsing if self.list.is_filtering() => self.forward(key),
            Mode::Browsing => self.open_selected(),
            Mode::Editing(_) => self.forward(key),
            Mode::Idle => {}
        }
    }

    fn submit_filename(&mut self) {
        let name = self.filename.value().trim().to_string();
        if name.is_empty() {
            return;
        }
        match self.store.create(&name) {
            Ok(handle) => {
                let title = file_title(&handle);
                self.filename.clear();
                self.filename.blur();
                self.editor.load(String::new());
                self.mode = Mode::Editing(handle);
                self.refresh_listing();
                self.set_status(format!("Editing {title} ⋅ ctrl+s save ⋅ esc discard"));
            }
            Err(VaultError::AlreadyExists { path }) => {
                tracing::debug!(path = %path.display(), "note already exists, keeping prompt open");
            }
            Err(err @ VaultError::InvalidName { .. }) => {
                tracing::debug!(?err, "rejected note name");
                self.set_status(err.to_string());
            }
            Err(err) => {
                tracing::error!(?err, "failed to create note");
                self.set_status(format!("Failed to create note: {err}"));
            }
        }
    }

    fn open_selected(&mut self) {
        debug_assert!(self.mode.open_note().is_none());
        let Some(note) = self.list.selected_item() else {
            return;
        };
        let title = note.title.clone();
        let opened = self
            .store
            .entry_path(&title)
            .and_then(|path| self.store.open(&path));
        match opened {
            Ok((content, handle)) => {
                self.editor.load(content);
                self.mode = Mode::Editing(handle);
                self.set_status(format!("Editing {title} ⋅ ctrl+s save ⋅ esc discard"));
            }
            Err(err) => {
                tracing::error!(?err, %title, "failed to open note");
                self.set_status(format!("Failed to open {title}: {err}"));
            }
        }
    }

    fn save(&mut self, key: KeyEvent) {
        if !self.mode.is_editing() {
            self.forward(key);
            return;
        }
        let Mode::Editing(handle) = &mut self.mode else {
            return;
        };
        let title = file_title(handle);
        match self.store.save(handle, self.editor.value()) {
            Ok(()) => {
                self.mode = Mode::Idle;
                self.editor.clear();
                self.set_status(format!("Saved {title}"));
            }
            Err(err) => {
                tracing::error!(?err, %title, "failed to save note");
                self.set_status(format!("Save failed, {title} on disk may be incomplete: {err}"));
            }
        }
    }

    fn delete_selected(&mut self, key: KeyEvent) {
        if !self.mode.is_browsing() {
            self.forward(key);
            return;
        }
        let Some(note) = self.list.selected_item() else {
            return;
        };
        let title = note.title.clone();
        let removed = self
            .store
            .entry_path(&title)
            .and_then(|path| self.store.delete(&path));
        match removed {
            Ok(()) => {
                self.refresh_listing();
                self.set_status(format!("Deleted {title}"));
            }
            Err(err) => {
                tracing::error!(?err, %title, "failed to delete note");
                self.set_status(format!("Failed to delete {title}: {err}"));
            }
        }
    }

    fn cancel(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Idle => {}
            Mode::CreatePrompt => {
                self.filename.clear();
                self.filename.blur();
                self.mode = Mode::Idle;
                self.clear_status();
            }
            Mode::Browsing if self.list.is_filtering() => self.forward(key),
            Mode::Browsing => {
                self.list.clear_filter();
                self.refresh_listing();
                self.mode = Mode::Idle;
            }
            Mode::Editing(_) => {
                if let Mode::Editing(handle) = std::mem::take(&mut self.mode) {
                    tracing::debug!(path = %handle.path().display(), "closed note without saving");
                }
                self.editor.clear();
                self.set_status("Closed without saving");
            }
        }
    }

    fn reject_while_editing(&mut self) {
        self.set_status("Finish editing first: ctrl+s to save or esc to discard");
    }

    fn refresh_listing(&mut self) {
        match self.listing.refresh() {
            Ok(notes) => self.list.set_items(notes),
            Err(err) => {
                tracing::error!(?err, "failed to list vault");
                self.list.set_items(Vec::new());
                self.set_status(format!("Could not list notes: {err}"));
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn file_title(handle: &crate::storage::NoteHandle) -> String {
    handle
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{self, NoteHandle};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Harness {
        _temp: TempDir,
        vault: PathBuf,
        controller: ModeController,
    }

    impl Harness {
        fn new() -> anyhow::Result<Self> {
            let temp = TempDir::new()?;
            let vault = temp.path().join(".gotion");
            let store = storage::init(&vault)?;
            let controller = ModeController::new(Arc::new(AppConfig::default()), store);
            Ok(Self {
                _temp: temp,
                vault,
                controller,
            })
        }

        fn press(&mut self, code: KeyCode) -> Outcome {
            let outcome = self
                .controller
                .handle_key(KeyEvent::new(code, KeyModifiers::NONE));
            self.assert_consistent();
            outcome
        }

        fn ctrl(&mut self, ch: char) -> Outcome {
            let outcome = self
                .controller
                .handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
            self.assert_consistent();
            outcome
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn note(&self, file: &str) -> PathBuf {
            self.vault.join(file)
        }

        fn mode(&self) -> &Mode {
            self.controller.mode()
        }

        fn listed_titles(&self) -> Vec<String> {
            self.controller
                .list()
                .visible_items()
                .into_iter()
                .map(|note| note.title.clone())
                .collect()
        }

        /// Exactly one mode holds, and each component is focused only in its mode.
        fn assert_consistent(&self) {
            let mode = self.controller.mode();
            let active = [
                mode.is_idle(),
                mode.is_create_prompt(),
                mode.is_editing(),
                mode.is_browsing(),
            ];
            assert_eq!(active.iter().filter(|on| **on).count(), 1);
            assert_eq!(mode.open_note().is_some(), mode.is_editing());
            assert_eq!(self.controller.editor().is_focused(), mode.is_editing());
            assert_eq!(
                self.controller.filename_input().is_focused(),
                mode.is_create_prompt()
            );
        }

        fn create_note(&mut self, name: &str, body: &str) {
            self.ctrl('n');
            self.type_text(name);
            self.press(KeyCode::Enter);
            self.type_text(body);
            self.ctrl('s');
        }
    }

    #[test]
    fn scenario_a_create_opens_empty_note_for_editing() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('n');
        assert!(h.mode().is_create_prompt());
        h.type_text("todo");
        h.press(KeyCode::Enter);

        assert!(h.mode().is_editing());
        assert_eq!(fs::metadata(h.note("todo.md"))?.len(), 0);
        assert_eq!(
            h.mode().open_note().map(|n| n.path().to_path_buf()),
            Some(h.note("todo.md"))
        );
        assert_eq!(h.controller.filename_input().value(), "");
        assert_eq!(h.listed_titles(), vec!["todo.md"]);
        Ok(())
    }

    #[test]
    fn scenario_b_save_writes_buffer_and_returns_to_idle() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "buy milk");

        assert!(h.mode().is_idle());
        assert_eq!(fs::read_to_string(h.note("todo.md"))?, "buy milk");
        assert_eq!(h.controller.editor().value(), "");
        assert_eq!(h.controller.status_message(), Some("Saved todo.md"));
        Ok(())
    }

    #[test]
    fn scenario_c_browse_and_delete() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "buy milk");

        h.ctrl('l');
        assert!(h.mode().is_browsing());
        assert_eq!(h.listed_titles(), vec!["todo.md"]);

        h.ctrl('d');
        assert!(h.mode().is_browsing());
        assert!(h.listed_titles().is_empty());
        assert!(!h.note("todo.md").exists());
        Ok(())
    }

    #[test]
    fn scenario_d_existing_name_keeps_prompt_open() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "original");

        h.ctrl('n');
        h.type_text("todo");
        h.press(KeyCode::Enter);

        assert!(h.mode().is_create_prompt());
        assert_eq!(h.controller.filename_input().value(), "todo");
        assert_eq!(fs::read_to_string(h.note("todo.md"))?, "original");
        assert_eq!(fs::read_dir(&h.vault)?.count(), 1);
        Ok(())
    }

    #[test]
    fn scenario_e_escape_discards_unsaved_edits() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "buy milk");

        h.ctrl('l');
        h.press(KeyCode::Enter);
        assert!(h.mode().is_editing());
        assert_eq!(h.controller.editor().value(), "buy milk");

        h.type_text(" and eggs");
        h.press(KeyCode::Esc);

        assert!(h.mode().is_idle());
        assert_eq!(h.controller.editor().value(), "");
        assert_eq!(fs::read_to_string(h.note("todo.md"))?, "buy milk");
        Ok(())
    }

    #[test]
    fn empty_or_blank_filename_keeps_prompt_open() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('n');
        h.press(KeyCode::Enter);
        assert!(h.mode().is_create_prompt());

        h.type_text("   ");
        h.press(KeyCode::Enter);
        assert!(h.mode().is_create_prompt());
        assert_eq!(fs::read_dir(&h.vault)?.count(), 0);
        Ok(())
    }

    #[test]
    fn invalid_filename_is_reported_and_prompt_stays() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('n');
        h.type_text("../escape");
        h.press(KeyCode::Enter);

        assert!(h.mode().is_create_prompt());
        let status = h.controller.status_message().unwrap_or_default();
        assert!(status.contains("invalid note name"), "got {status:?}");
        assert_eq!(fs::read_dir(&h.vault)?.count(), 0);
        Ok(())
    }

    #[test]
    fn cancel_create_prompt_discards_pending_name() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('n');
        h.type_text("draft");
        h.press(KeyCode::Esc);
        assert!(h.mode().is_idle());

        h.ctrl('n');
        assert_eq!(h.controller.filename_input().value(), "");
        Ok(())
    }

    #[test]
    fn cancel_in_idle_changes_nothing() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "kept");
        let status_before = h.controller.status_message().map(str::to_owned);

        h.press(KeyCode::Esc);
        h.press(KeyCode::Esc);

        assert!(h.mode().is_idle());
        assert_eq!(h.controller.status_message().map(str::to_owned), status_before);
        assert_eq!(h.controller.editor().value(), "");
        assert_eq!(fs::read_to_string(h.note("todo.md"))?, "kept");
        Ok(())
    }

    #[test]
    fn browse_and_new_are_refused_while_editing() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('n');
        h.type_text("todo");
        h.press(KeyCode::Enter);
        h.type_text("draft");

        h.ctrl('l');
        assert!(h.mode().is_editing());
        h.ctrl('n');
        assert!(h.mode().is_editing());
        assert_eq!(h.controller.editor().value(), "draft");
        assert!(h
            .controller
            .status_message()
            .is_some_and(|s| s.contains("Finish editing")));
        Ok(())
    }

    #[test]
    fn new_prompt_from_browsing_replaces_list_view() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('l');
        h.ctrl('n');
        assert!(h.mode().is_create_prompt());
        h.ctrl('l');
        assert!(h.mode().is_browsing());
        assert_eq!(h.controller.filename_input().value(), "");
        Ok(())
    }

    #[test]
    fn enter_on_empty_list_stays_browsing() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('l');
        h.press(KeyCode::Enter);
        h.ctrl('d');
        assert!(h.mode().is_browsing());
        Ok(())
    }

    #[test]
    fn open_failure_keeps_browsing_and_reports() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("gone", "x");
        h.ctrl('l');
        fs::remove_file(h.note("gone.md"))?;

        h.press(KeyCode::Enter);
        assert!(h.mode().is_browsing());
        assert!(h
            .controller
            .status_message()
            .is_some_and(|s| s.starts_with("Failed to open gone.md")));
        Ok(())
    }

    #[test]
    fn delete_failure_keeps_browsing_and_reports() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("gone", "x");
        h.ctrl('l');
        fs::remove_file(h.note("gone.md"))?;

        h.ctrl('d');
        assert!(h.mode().is_browsing());
        assert!(h
            .controller
            .status_message()
            .is_some_and(|s| s.starts_with("Failed to delete gone.md")));
        Ok(())
    }

    #[test]
    fn failed_save_stays_editing_with_buffer_and_handle() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "on disk");
        h.ctrl('l');
        h.press(KeyCode::Enter);
        h.type_text(" and more");

        let path = h.note("todo.md");
        h.controller.mode = Mode::Editing(NoteHandle::read_only(&path)?);
        h.ctrl('s');

        assert!(h.mode().is_editing());
        assert_eq!(
            h.mode().open_note().map(|n| n.path().to_path_buf()),
            Some(path.clone())
        );
        assert_eq!(h.controller.editor().value(), "on disk and more");
        assert!(h
            .controller
            .status_message()
            .is_some_and(|s| s.contains("may be incomplete")));
        assert_eq!(fs::read_to_string(&path)?, "on disk");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn listed_entry_with_backslash_can_be_opened_and_deleted() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        fs::write(h.note("a\\b.md"), "odd name")?;
        h.ctrl('l');
        assert_eq!(h.listed_titles(), vec!["a\\b.md"]);

        h.press(KeyCode::Enter);
        assert!(h.mode().is_editing());
        assert_eq!(h.controller.editor().value(), "odd name");
        h.press(KeyCode::Esc);

        h.ctrl('l');
        h.ctrl('d');
        assert!(h.listed_titles().is_empty());
        assert!(!h.note("a\\b.md").exists());
        Ok(())
    }

    #[test]
    fn reentering_browsing_starts_without_old_filter() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "x");
        h.ctrl('l');
        h.press(KeyCode::Char('/'));
        h.type_text("z");
        assert!(h.listed_titles().is_empty());

        h.ctrl('n');
        h.press(KeyCode::Esc);
        h.ctrl('l');
        assert!(!h.controller.list().is_filtering());
        assert_eq!(h.controller.list().filter(), "");
        assert_eq!(h.listed_titles(), vec!["todo.md"]);
        assert_eq!(h.press(KeyCode::Char('q')), Outcome::Quit);
        Ok(())
    }

    #[test]
    fn listing_is_refreshed_when_entering_browsing() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('l');
        assert!(h.listed_titles().is_empty());
        h.press(KeyCode::Esc);

        fs::write(h.note("external.md"), "added behind our back")?;
        h.ctrl('l');
        assert_eq!(h.listed_titles(), vec!["external.md"]);
        Ok(())
    }

    #[test]
    fn escape_while_filtering_clears_filter_but_stays_browsing() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("alpha", "a");
        h.create_note("beta", "b");
        h.ctrl('l');

        h.press(KeyCode::Char('/'));
        h.type_text("be");
        assert_eq!(h.listed_titles(), vec!["beta.md"]);

        h.press(KeyCode::Esc);
        assert!(h.mode().is_browsing());
        assert_eq!(h.listed_titles().len(), 2);

        h.press(KeyCode::Esc);
        assert!(h.mode().is_idle());
        Ok(())
    }

    #[test]
    fn enter_while_filtering_accepts_filter_then_opens() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("alpha", "first");
        h.create_note("beta", "second");
        h.ctrl('l');

        h.press(KeyCode::Char('/'));
        h.type_text("beta");
        h.press(KeyCode::Enter);
        assert!(h.mode().is_browsing());

        h.press(KeyCode::Enter);
        assert!(h.mode().is_editing());
        assert_eq!(h.controller.editor().value(), "second");
        Ok(())
    }

    #[test]
    fn list_navigation_selects_note_to_open() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("alpha", "first");
        h.create_note("beta", "second");
        h.ctrl('l');
        h.press(KeyCode::Down);
        h.press(KeyCode::Enter);
        assert_eq!(h.controller.editor().value(), "second");
        Ok(())
    }

    #[test]
    fn q_is_text_while_typing_and_quits_otherwise() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.ctrl('n');
        assert_eq!(h.press(KeyCode::Char('q')), Outcome::Continue);
        assert_eq!(h.controller.filename_input().value(), "q");
        h.press(KeyCode::Enter);

        assert_eq!(h.press(KeyCode::Char('q')), Outcome::Continue);
        assert_eq!(h.controller.editor().value(), "q");
        h.ctrl('s');

        h.ctrl('l');
        h.press(KeyCode::Char('/'));
        assert_eq!(h.press(KeyCode::Char('q')), Outcome::Continue);
        h.press(KeyCode::Esc);
        assert_eq!(h.press(KeyCode::Char('q')), Outcome::Quit);
        Ok(())
    }

    #[test]
    fn ctrl_c_quits_from_editing_without_saving() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.create_note("todo", "saved");
        h.ctrl('l');
        h.press(KeyCode::Enter);
        h.type_text(" unsaved");

        assert_eq!(h.ctrl('c'), Outcome::Quit);
        assert!(h.mode().open_note().is_none());
        assert_eq!(fs::read_to_string(h.note("todo.md"))?, "saved");
        Ok(())
    }

    #[test]
    fn pass_through_keys_never_touch_the_vault() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        h.type_text("hello");
        h.press(KeyCode::Down);
        h.ctrl('s');
        h.ctrl('d');
        assert!(h.mode().is_idle());
        assert_eq!(fs::read_dir(&h.vault)?.count(), 0);
        Ok(())
    }

    #[test]
    fn resize_forwards_inner_size_to_list() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        let outcome = h.controller.handle_event(Event::Resize(100, 40));
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(h.controller.list().size(), (96, 33));
        Ok(())
    }

    #[test]
    fn key_release_events_are_ignored() -> anyhow::Result<()> {
        let mut h = Harness::new()?;
        let mut release = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        h.controller.handle_key(release);
        assert!(h.mode().is_idle());
        Ok(())
    }
}
