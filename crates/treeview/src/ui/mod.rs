//! Terminal user interface built on ratatui and crossterm.

pub mod app;
pub mod components;
pub mod keys;
pub mod sink;
pub mod text;
