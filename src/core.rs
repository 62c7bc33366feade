//! Expansion core
//!
//! - Keyword matching inside delimiters
//! - Trigger evaluation over key events
//! - The replacement engine and the editing surface it drives
//! - Per-target attachment and named dispatch

pub mod engine;
pub mod matcher;
pub mod registry;
pub mod step_log;
pub mod surface;
pub mod trigger;
