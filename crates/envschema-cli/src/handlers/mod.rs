//! Command handlers for the envschema CLI

mod check;
mod completions;
mod example;

pub use check::handle_check;
pub use completions::handle_completions;
pub use example::handle_example;
