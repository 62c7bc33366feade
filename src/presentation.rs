//! Presentation layer

pub mod widgets;
