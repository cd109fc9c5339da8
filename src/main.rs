//! pollcalc - a terminal page with a poll form and a calculator form.
//!
//! Without a subcommand this runs the terminal UI. `eval` and `render` run
//! the same handlers from the command line.

use std::io;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use pollcalc::application::{App, AppMode};
use pollcalc::config::{Cli, Command};
use pollcalc::domain::{format_number, Calculator, MessageDisplay, Page};
use pollcalc::infrastructure::FileRepository;
use pollcalc::logging;
use pollcalc::presentation::{render_ui, InputHandler, RestoreGuard};

/// Exit status for an expression that could not be evaluated.
const EXIT_EVAL_FAILED: i32 = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.is_interactive() {
        if let Some(path) = &cli.log_file {
            logging::init_file_logger(path, cli.verbose)?;
        }
    } else {
        logging::init_cli_logger(cli.verbose);
    }

    match cli.command {
        Some(Command::Eval { expression }) => run_eval(&expression),
        Some(Command::Render { response, expression }) => {
            run_render(response.as_deref(), expression.as_deref());
            Ok(())
        }
        None => run_interactive(cli.load.as_deref()),
    }
}

fn run_eval(expression: &str) -> Result<(), Box<dyn std::error::Error>> {
    match Calculator::evaluate(expression) {
        Ok(value) => {
            println!("{}", format_number(value));
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(EXIT_EVAL_FAILED);
        }
    }
}

fn run_render(response: Option<&str>, expression: Option<&str>) {
    let mut page = Page::default();
    if let Some(response) = response {
        MessageDisplay::display(&mut page, response);
    }
    if let Some(expression) = expression {
        // The error text is already on the page.
        let _ = Calculator::calculate(&mut page, expression);
    }
    print!("{}", page.render_html());
}

/// Sets up the terminal, runs the event loop and restores the terminal.
fn run_interactive(load: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::default();
    if let Some(filename) = load {
        app.set_load_result(FileRepository::load_page(filename));
    }

    tracing::info!("starting terminal UI");

    let res = {
        enable_raw_mode()?;
        let _raw_mode = RestoreGuard::new(|| {
            if let Err(err) = disable_raw_mode() {
                tracing::warn!(%err, "could not disable raw mode");
            }
        });

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let _screen = RestoreGuard::new(|| {
            if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
                tracing::warn!(%err, "could not leave alternate screen");
            }
        });

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = run_app(&mut terminal, &mut app);
        terminal.show_cursor()?;
        res
    };

    if let Err(err) = res {
        tracing::error!(%err, "terminal UI failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
