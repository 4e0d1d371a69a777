//! Domain Services
//!
//! Stateless logic over entities; I/O only through ports.

pub mod freshness;

pub use freshness::{evaluate, Freshness, StaleReason};
