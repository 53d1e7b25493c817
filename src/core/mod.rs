//! Core module for common functionality across all targets

pub mod business;
pub mod catalog;
pub mod config;
pub mod export;
pub mod models;
pub mod quiz;
pub mod referral;
pub mod seed;
pub mod session;
pub mod storage;
pub mod validation;

/// Returns the current version of the `Relevate` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
