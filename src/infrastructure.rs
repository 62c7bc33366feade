//! Infrastructure layer
//!
//! This module handles external integrations:
//! - Terminal setup and teardown
//! - CLI argument processing
//! - Configuration loading
//! - The tui-textarea editing surface

pub mod cli;
pub mod config;
pub mod textarea_surface;
pub mod tui;
