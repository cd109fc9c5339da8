use std::borrow::Cow;

use crate::application::{App, AppMode};
use crate::domain::FormKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Replaces control characters with U+FFFD so text cannot drive the terminal.
///
/// Terminal escape sequences start with control characters (ESC, CSI, BEL);
/// nothing that reaches a [`Span`] from the page or a prompt may contain one.
pub fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { char::REPLACEMENT_CHARACTER } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_form(f, app, FormKind::Poll, chunks[1]);
    render_form(f, app, FormKind::Calc, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let filename = app.filename.as_deref().unwrap_or("unsaved");
    let header = Paragraph::new(format!(
        "pollcalc | Form: {} | File: {}",
        app.focused_form.form_id(),
        printable(filename)
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn form_title(form: FormKind) -> &'static str {
    match form {
        FormKind::Poll => "poll-form: Poll",
        FormKind::Calc => "calc-form: Calculator",
    }
}

/// Draws one form: its field line and its output element.
///
/// Every user-supplied string goes through [`printable`] into a raw [`Span`],
/// so it is drawn as literal characters.
fn render_form(f: &mut Frame, app: &App, form: FormKind, area: Rect) {
    let focused = app.focused_form == form;
    let editing = focused && app.mode == AppMode::Editing;

    let border_style = if editing {
        Style::default().fg(Color::Green)
    } else if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default()
    };

    let field_value = if editing {
        app.input.as_str()
    } else {
        app.page.field_value(form)
    };

    let field_label = format!("{}: ", form.field_id());
    let output_label = format!("{}: ", form.output_id());
    let output_text = app.page.text_content(form.output_id()).unwrap_or_default();

    let output_style = match form {
        FormKind::Calc if output_text.starts_with("Error:") => Style::default().fg(Color::Red),
        _ => Style::default(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(field_label.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(printable(field_value)),
        ]),
        Line::from(vec![
            Span::styled(output_label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(printable(output_text), output_style),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form_title(form))
        .border_style(border_style);
    let inner = block.inner(area);

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);

    if editing {
        let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
        let offset = Span::raw(field_label).width() + Span::raw(printable(&before_cursor)).width();
        let x = inner.x.saturating_add(offset as u16).min(inner.right().saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab: switch form | Enter: edit | Ctrl+S: save | Ctrl+O: load | Ctrl+E: export HTML | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => format!(
            "Editing {} (Enter to submit, Esc to cancel)",
            app.focused_form.field_id()
        ),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::SaveAs => format!("Save as: {} (Enter to save, Esc to cancel)", app.filename_input),
        AppMode::LoadFile => format!("Load file: {} (Enter to load, Esc to cancel)", app.filename_input),
        AppMode::ExportHtml => format!("Export HTML as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let status = Paragraph::new(printable(&input_text).into_owned())
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::SaveAs | AppMode::LoadFile => Style::default().fg(Color::Yellow),
            AppMode::ExportHtml => Style::default().fg(Color::Magenta),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("pollcalc Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub const HELP_TEXT: &str = r#"POLLCALC REFERENCE

=== POLL FORM ===
Type any text into the response field and press Enter.
The output shows "You said: " followed by your text, exactly as typed.
Markup such as <b> or <script> is displayed as literal characters.

=== CALC FORM ===
Type an arithmetic expression into the expression field and press Enter.
Numbers           42, 3.14, .5
+ -               Addition, subtraction        1+2 → 3
* /               Multiplication, division     6/4 → 1.5
( )               Grouping                     (1+2)*3 → 9
-x, +x            Sign                         -(2-5) → 3

Anything else (names, calls, statements) is rejected as an invalid expression.
Division by zero and results too large to represent are reported as errors.
Expressions are limited to 1024 characters and 64 levels of nesting.

=== FILE OPERATIONS ===
Ctrl+S          Save the page as a JSON snapshot
Ctrl+O          Load a JSON snapshot
Ctrl+E          Export the page as an HTML document (all text escaped)

=== NAVIGATION ===
Tab / Shift+Tab Switch between the poll and calc forms
↑↓ or j/k       Switch between forms
Enter / i / F2  Edit the focused form's field
Esc             Cancel editing
F1 or ?         Show this help
q               Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;
