//! Application layer managing state and form workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! tracking focus, input buffers and file prompts.

pub mod state;

pub use state::*;
