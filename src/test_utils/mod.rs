//! Shared helpers for unit tests: canned configs, API fixtures, and
//! hand-written mocks for the source/store seams.

pub mod config;
pub mod fixtures;
pub mod mocks;
