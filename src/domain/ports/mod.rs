//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod checker;
pub mod dependency_discovery;
pub mod file_system;
pub mod generator;
pub mod record_repository;

pub use checker::{Checker, CheckerOutcome};
pub use dependency_discovery::DependencyDiscovery;
pub use file_system::{FileSystem, FsError, FsResult};
pub use generator::Generator;
pub use record_repository::{RecordError, RecordRepository, RecordResult};
