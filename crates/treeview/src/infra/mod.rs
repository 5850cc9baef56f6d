//! Infrastructure adapters for config, logging, tree documents, and the clipboard.

pub mod clipboard;
pub mod config;
pub mod logging;
pub mod tree_file;
