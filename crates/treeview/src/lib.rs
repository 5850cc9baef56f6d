pub mod app;
pub mod domain;
pub mod infra;
pub mod ui;

pub use app::command::{CommandSink, FileOperation, RecordingSink};
pub use app::render::{MenuView, RenderedView, Row, RowKind, render};
pub use app::state::{ContextMenu, InteractionState};
pub use domain::model::{Node, NodePath, TreeModel};
