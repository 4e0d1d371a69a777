//! stampcheck - incremental check runner for make-driven Python GUI projects
//!
//! A unit is rechecked only when its stamp is missing or older than the
//! target or any file in its recorded dependency list. On success a fresh
//! make-include dependency record is written and the stamp is touched; on
//! failure both are left alone so make retries next time. A UI generator
//! rule (`pyuic5`) is wrapped the same way.

pub mod application;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    CheckOptions, CheckOutcome, CheckReport, CheckUseCase, GenerateOptions, GenerateOutcome,
    GenerateReport, GenerateUseCase,
};
pub use config::{Config, DiscoveryMode, Verbosity};
pub use domain::entities::{CheckUnit, DependencyRecord};
pub use domain::services::{Freshness, StaleReason};
pub use error::{StampError, StampResult};
pub use infrastructure::repositories::{parse_depfile, render_depfile};
