//! Shared library for `Relevate`
//! Contains the business training core (catalog, employee registry, completion
//! and certification ledger, persistence) used by the CLI.

pub mod core;
pub mod logger;

pub use crate::core::*;
