//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! handles keyboard input, and renders both forms.

pub mod input;
pub mod terminal;
pub mod ui;

pub use input::*;
pub use terminal::*;
pub use ui::*;
