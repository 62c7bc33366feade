//! Domain types shared by the core and the editing surfaces

pub mod ui;
