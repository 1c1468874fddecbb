//! HTTP Handlers

mod generate;
mod root;

pub use generate::*;
pub use root::*;
