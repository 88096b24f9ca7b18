//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution (via `get_gog_binary`)
//! - Running `gog __complete` and collecting its lines (via `helpers`)

pub(crate) mod helpers;

// Re-export for convenient access
pub(crate) use helpers::{complete, complete_with, get_gog_binary, gog_command};
