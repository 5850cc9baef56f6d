//! Application layer: interaction state, its transitions, and the pure renderer.

pub mod command;
pub mod input;
pub mod render;
pub mod state;
