//! Application state management for the terminal page.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use tracing::debug;

use crate::domain::{format_number, Calculator, FormKind, MessageDisplay, Page};
use crate::infrastructure::PersistenceError;

pub const DEFAULT_SNAPSHOT_FILENAME: &str = "page.json";
pub const DEFAULT_EXPORT_FILENAME: &str = "page.html";

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which prompt the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation between forms, shortcuts available
    Normal,
    /// User is typing into the focused form's field
    Editing,
    /// Help screen is displayed
    Help,
    /// Save dialog is open
    SaveAs,
    /// Load dialog is open
    LoadFile,
    /// HTML export dialog is open
    ExportHtml,
}

/// Main application state containing the page and UI state.
///
/// # Examples
///
/// ```
/// use pollcalc::application::{App, AppMode};
/// use pollcalc::domain::FormKind;
///
/// let app = App::default();
/// assert_eq!(app.focused_form, FormKind::Poll);
/// assert_eq!(app.mode, AppMode::Normal);
/// ```
#[derive(Debug)]
pub struct App {
    /// Field values and element contents
    pub page: Page,
    /// Form that receives edits and submissions
    pub focused_form: FormKind,
    /// Current application mode
    pub mode: AppMode,
    /// Field input buffer (editing mode)
    pub input: String,
    /// Cursor position within the active buffer, in characters
    pub cursor_position: usize,
    /// Current snapshot filename (if saved or loaded)
    pub filename: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
}

impl Default for App {
    fn default() -> Self {
        Self::with_page(Page::default())
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

impl App {
    pub fn with_page(page: Page) -> Self {
        Self {
            page,
            focused_form: FormKind::Poll,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            filename: None,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
        }
    }

    /// Moves focus to the other form.
    pub fn switch_focus(&mut self) {
        self.focused_form = self.focused_form.other();
    }

    /// Switches to editing mode for the focused form's field.
    ///
    /// The field's last submitted value is loaded into the input buffer with
    /// the cursor at the end.
    pub fn start_editing(&mut self) {
        self.mode = AppMode::Editing;
        self.input = self.page.field_value(self.focused_form).to_string();
        self.cursor_position = self.input.chars().count();
        self.status_message = None;
    }

    /// Submits the focused form with the current input and returns to normal
    /// mode.
    pub fn submit_form(&mut self) {
        let form = self.focused_form;
        let input = std::mem::take(&mut self.input);

        match form {
            FormKind::Poll => {
                MessageDisplay::display(&mut self.page, &input);
                self.status_message = Some(format!("{} submitted", form.form_id()));
            }
            FormKind::Calc => {
                let status = match Calculator::calculate(&mut self.page, &input) {
                    Ok(value) => format!("{} = {}", form.form_id(), format_number(value)),
                    Err(err) => format!("{}: {}", form.form_id(), err),
                };
                self.status_message = Some(status);
            }
        }

        debug!(form = form.form_id(), "form handled");
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    /// Cancels editing and returns to normal mode without submitting.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    fn active_buffer(&self) -> Option<&String> {
        match self.mode {
            AppMode::Editing => Some(&self.input),
            AppMode::SaveAs | AppMode::LoadFile | AppMode::ExportHtml => Some(&self.filename_input),
            AppMode::Normal | AppMode::Help => None,
        }
    }

    fn active_buffer_mut(&mut self) -> Option<&mut String> {
        match self.mode {
            AppMode::Editing => Some(&mut self.input),
            AppMode::SaveAs | AppMode::LoadFile | AppMode::ExportHtml => Some(&mut self.filename_input),
            AppMode::Normal | AppMode::Help => None,
        }
    }

    fn active_len(&self) -> usize {
        self.active_buffer().map(|b| b.chars().count()).unwrap_or(0)
    }

    /// Inserts a character at the cursor of the active buffer.
    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        if let Some(buffer) = self.active_buffer_mut() {
            let idx = byte_index(buffer, cursor);
            buffer.insert(idx, c);
            self.cursor_position += 1;
        }
    }

    /// Deletes the character before the cursor.
    pub fn delete_backward(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor = self.cursor_position - 1;
        if let Some(buffer) = self.active_buffer_mut() {
            let idx = byte_index(buffer, cursor);
            buffer.remove(idx);
            self.cursor_position = cursor;
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor_position >= self.active_len() {
            return;
        }
        let cursor = self.cursor_position;
        if let Some(buffer) = self.active_buffer_mut() {
            let idx = byte_index(buffer, cursor);
            buffer.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.active_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.active_len();
    }

    fn start_filename_prompt(&mut self, mode: AppMode, initial: String) {
        self.mode = mode;
        self.filename_input = initial;
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Switches to save-as mode to prompt for a filename.
    pub fn start_save_as(&mut self) {
        let initial = self.filename.clone().unwrap_or_else(|| DEFAULT_SNAPSHOT_FILENAME.to_string());
        self.start_filename_prompt(AppMode::SaveAs, initial);
    }

    /// Switches to load-file mode to prompt for a filename.
    pub fn start_load_file(&mut self) {
        let initial = self.filename.clone().unwrap_or_else(|| DEFAULT_SNAPSHOT_FILENAME.to_string());
        self.start_filename_prompt(AppMode::LoadFile, initial);
    }

    /// Switches to HTML export mode to prompt for a filename.
    ///
    /// Suggests the snapshot name with an `.html` extension when one is known.
    pub fn start_html_export(&mut self) {
        let initial = self
            .filename
            .as_ref()
            .map(|f| match f.strip_suffix(".json") {
                Some(stem) => format!("{stem}.html"),
                None => format!("{f}.html"),
            })
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string());
        self.start_filename_prompt(AppMode::ExportHtml, initial);
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.finish_filename_prompt();
    }

    fn finish_filename_prompt(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Filename typed at the prompt, or the default for the current mode.
    pub fn target_filename(&self) -> String {
        let trimmed = self.filename_input.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
        match self.mode {
            AppMode::ExportHtml => DEFAULT_EXPORT_FILENAME.to_string(),
            _ => DEFAULT_SNAPSHOT_FILENAME.to_string(),
        }
    }

    /// Processes the result of a save operation.
    pub fn set_save_result(&mut self, result: Result<String, PersistenceError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Saved to {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }

        self.finish_filename_prompt();
    }

    /// Processes the result of a load operation.
    ///
    /// Replaces the page on success; the previous page is kept on failure.
    pub fn set_load_result(&mut self, result: Result<(Page, String), PersistenceError>) {
        match result {
            Ok((page, filename)) => {
                self.page = page;
                self.focused_form = FormKind::Poll;
                self.status_message = Some(format!("Loaded from {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }

        self.finish_filename_prompt();
    }

    /// Processes the result of an HTML export.
    pub fn set_export_result(&mut self, result: Result<String, PersistenceError>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported to {}", filename),
            Err(error) => format!("Export failed: {}", error),
        });

        self.finish_filename_prompt();
    }
}
