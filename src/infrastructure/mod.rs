//! Infrastructure layer providing external service integrations.
//!
//! File I/O for page snapshots and HTML export lives here.

pub mod persistence;

pub use persistence::*;
