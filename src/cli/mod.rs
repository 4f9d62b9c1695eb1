//! CLI-specific utilities for butterfly-visit
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod progress;
pub mod summary;

pub use progress::ProgressManager;
pub use summary::render_summary;
