//! Common test utilities for stampcheck CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory with fake checker/generator scripts
//! - Fixtures: Reusable file contents and config snippets

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
