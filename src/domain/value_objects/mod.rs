//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

pub mod path;
mod tool_status;

pub use path::{normalize, parent_dir};
pub use tool_status::ToolStatus;
