//! Common utilities for the Folio renderer.
//!
//! This crate provides shared infrastructure used by all renderer components:
//! - **Warning System** - colored terminal output for degraded-input diagnostics

pub mod warning;
