//! Domain Entities
//!
//! - `CheckUnit` - the paths of one checked file
//! - `SourceFile` - a file and its observed mtime
//! - `Stamp` - the success marker of a unit
//! - `DependencyRecord` - persisted make rules per unit

mod dependency_record;
mod source_file;
mod stamp;
mod unit;

pub use dependency_record::DependencyRecord;
pub use source_file::SourceFile;
pub use stamp::Stamp;
pub use unit::CheckUnit;
