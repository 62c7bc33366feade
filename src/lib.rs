//! # kwexpand - in-place keyword expansion
//!
//! Watches key events on an editable text surface and, when a trigger key
//! fires, replaces the first delimited keyword (`{keyword}` by default) in
//! the line under the cursor with its configured replacement. The cursor
//! stays at the same logical position.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
//! use kwexpand::core::engine::Options;
//! use kwexpand::core::registry::{Registry, TargetId};
//! use kwexpand::domain::ui::CursorPosition;
//! use kwexpand::test_helpers::LineBuffer;
//!
//! let mut registry = Registry::new();
//! let target = TargetId::from("notes");
//! registry
//!     .attach(
//!         target.clone(),
//!         Options {
//!             filters: Some(HashMap::from([("hello".into(), "Hello there".into())])),
//!             append: Some(" ".into()),
//!             ..Default::default()
//!         },
//!     )
//!     .unwrap();
//!
//! let mut buffer = LineBuffer::new("say {hello} now", CursorPosition::new(0, 11));
//! let release = KeyEvent::new_with_kind(KeyCode::Char('}'), KeyModifiers::NONE, KeyEventKind::Release);
//! registry.handle_event(&target, &release, &mut buffer).unwrap();
//!
//! assert_eq!(buffer.text(), "say Hello there  now");
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Matcher, trigger, engine, surface trait and registry
//! - [`domain`] - Cursor positions and splices
//! - [`infrastructure`] - Config, CLI, terminal and the tui-textarea surface
//! - [`app`] - The terminal editor
//! - [`error`] - Error types

pub mod app;
pub mod core;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod model;
pub mod presentation;
pub mod test_helpers;
pub mod utils;

pub use crate::core::engine::{Options, Outcome, ReplacementEngine, Settings};
pub use crate::core::registry::{Call, Dispatched, Registry, TargetId};
pub use error::Error;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
