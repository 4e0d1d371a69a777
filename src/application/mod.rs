//! Application Layer
//!
//! Use cases that orchestrate domain services through ports.
//!
//! - `check` - the incremental check runner
//! - `generate` - UI descriptor to source regeneration

pub mod check;
pub mod generate;

pub use check::{CheckOptions, CheckOutcome, CheckReport, CheckUseCase};
pub use generate::{GenerateOptions, GenerateOutcome, GenerateReport, GenerateUseCase};
