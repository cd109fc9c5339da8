pub mod errors;
pub mod markup;
pub mod models;
pub mod parser;
pub mod services;

pub use errors::*;
pub use markup::*;
pub use models::*;
pub use services::*;
