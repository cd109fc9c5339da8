//! pollcalc - a terminal page with a poll form and a calculator form.
//!
//! Poll responses are echoed back as plain text and calculator input is
//! evaluated by a small arithmetic parser. User text is never interpreted as
//! markup or code.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use application::*;
pub use domain::*;
