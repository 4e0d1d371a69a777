//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - local file system
//! - `repositories/` - make-include dependency records
//! - `discovery/` - dependency discovery strategies
//! - `checker` / `generator` - external tools as child processes

pub mod checker;
pub mod discovery;
pub mod fs;
pub mod generator;
pub mod process;
pub mod repositories;

// Re-export for convenience
pub use checker::CommandChecker;
pub use discovery::{ConfiguredDiscovery, PythonImportScanner, ReportedDependencies, TargetOnly};
pub use fs::LocalFs;
pub use generator::CommandGenerator;
pub use process::OutputMode;
pub use repositories::MakeDepfileRepository;
