//! Domain Layer
//!
//! The incremental-check model: units, stamps, dependency records and the
//! freshness rule that ties them together.
//!
//! ## Structure
//!
//! - `entities/` - CheckUnit, SourceFile, Stamp, DependencyRecord
//! - `value_objects/` - path normalization, tool exit status
//! - `services/` - freshness evaluation
//! - `ports/` - interfaces for file system, checker, discovery, generator
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - everything goes through a port
//! 2. **File-backed state** - stamps and records are passed by path

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
