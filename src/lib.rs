//! PokeVerse TUI - catalog viewer over the PokeAPI.
//!
//! The library exposes the modules for integration tests.

pub mod action;
pub mod api;
pub mod effect;
pub mod pager;
pub mod query;
pub mod record;
pub mod reducer;
pub mod state;
pub mod ui;
