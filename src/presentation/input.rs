use crate::application::{App, AppMode};
use crate::infrastructure::FileRepository;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::SaveAs | AppMode::LoadFile | AppMode::ExportHtml => {
                Self::handle_filename_input_mode(app, key)
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => app.start_save_as(),
                KeyCode::Char('o') => app.start_load_file(),
                KeyCode::Char('e') => app.start_html_export(),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('j')
            | KeyCode::Char('k') => {
                app.switch_focus();
            }
            KeyCode::Enter | KeyCode::F(2) | KeyCode::Char('i') => {
                app.start_editing();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    /// Shared line editing for every text prompt.
    fn handle_line_editing(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Backspace => app.delete_backward(),
            KeyCode::Delete => app.delete_forward(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.cancel_editing(),
            _ => Self::handle_line_editing(app, key),
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.target_filename();
                match app.mode {
                    AppMode::SaveAs => {
                        let result = FileRepository::save_page(&app.page, &filename);
                        app.set_save_result(result);
                    }
                    AppMode::LoadFile => {
                        let result = FileRepository::load_page(&filename);
                        app.set_load_result(result);
                    }
                    AppMode::ExportHtml => {
                        let result = FileRepository::export_html(&app.page, &filename);
                        app.set_export_result(result);
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            _ => Self::handle_line_editing(app, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormKind, CALC_RESULT_ELEMENT_ID, OUTPUT_ELEMENT_ID};
    use tempfile::TempDir;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_poll_form_key_flow() {
        let mut app = App::default();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Editing);

        type_text(&mut app, "<h1>q</h1>");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.page.text_content(OUTPUT_ELEMENT_ID).unwrap(), "You said: <h1>q</h1>");
    }

    #[test]
    fn test_calc_form_key_flow() {
        let mut app = App::default();

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_form, FormKind::Calc);

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "2+2");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(), "4");
    }

    #[test]
    fn test_q_and_j_are_text_while_editing() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "jkq?");

        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.focused_form, FormKind::Poll);
        assert_eq!(app.input, "jkq?");
    }

    #[test]
    fn test_escape_cancels_editing() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.page.text_content(OUTPUT_ELEMENT_ID).unwrap(), "");
    }

    #[test]
    fn test_help_mode_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.help_scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_ctrl_shortcuts_open_prompts() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(app.mode, AppMode::ExportHtml);
        assert_eq!(app.filename_input, "page.html");
        press(&mut app, KeyCode::Esc);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(app.mode, AppMode::SaveAs);
        assert_eq!(app.filename_input, "page.json");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filename_input, "page.jso");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_save_then_load_through_prompts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.json");
        let path = path.to_str().unwrap().to_string();

        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "saved");
        press(&mut app, KeyCode::Enter);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        app.filename_input.clear();
        app.cursor_position = 0;
        type_text(&mut app, &path);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.filename.as_deref(), Some(path.as_str()));

        let mut fresh = App::default();
        InputHandler::handle_key_event(&mut fresh, KeyCode::Char('o'), KeyModifiers::CONTROL);
        fresh.filename_input.clear();
        fresh.cursor_position = 0;
        type_text(&mut fresh, &path);
        press(&mut fresh, KeyCode::Enter);

        assert_eq!(fresh.page, app.page);
        assert_eq!(fresh.status_message, Some(format!("Loaded from {}", path)));
    }
}
