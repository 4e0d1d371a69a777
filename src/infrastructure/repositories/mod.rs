//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

pub mod depfile;

pub use depfile::{parse_depfile, render_depfile, MakeDepfileRepository};
