//! File operations requested from the context menu and the sinks that receive them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::model::NodePath;

/// Operations offered by the context menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOperation {
    Copy,
    Delete,
    Rename,
}

impl FileOperation {
    pub const ALL: [FileOperation; 3] = [
        FileOperation::Copy,
        FileOperation::Delete,
        FileOperation::Rename,
    ];

    /// Wire name passed to sinks, e.g. `"delete"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FileOperation::Copy => "copy",
            FileOperation::Delete => "delete",
            FileOperation::Rename => "rename",
        }
    }

    /// Menu label, e.g. `"Delete"`.
    pub fn label(self) -> &'static str {
        match self {
            FileOperation::Copy => "Copy",
            FileOperation::Delete => "Delete",
            FileOperation::Rename => "Rename",
        }
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External collaborator that performs (or rejects) requested file operations.
///
/// Calls are fire-and-forget: the tree view never observes the outcome.
pub trait CommandSink {
    fn on_file_operation(&mut self, operation: FileOperation, target: &NodePath);
}

impl<F> CommandSink for F
where
    F: FnMut(FileOperation, &NodePath),
{
    fn on_file_operation(&mut self, operation: FileOperation, target: &NodePath) {
        self(operation, target)
    }
}

/// Sink that keeps every request in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingSink {
    requests: Vec<(FileOperation, NodePath)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[(FileOperation, NodePath)] {
        &self.requests
    }
}

impl CommandSink for RecordingSink {
    fn on_file_operation(&mut self, operation: FileOperation, target: &NodePath) {
        self.requests.push((operation, target.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_act_as_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |op: FileOperation, target: &NodePath| seen.push(format!("{op} {target}"));
            sink.on_file_operation(FileOperation::Rename, &NodePath::from("/root/a"));
        }
        assert_eq!(seen, vec!["rename /root/a".to_string()]);
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.on_file_operation(FileOperation::Copy, &"/root/a".into());
        sink.on_file_operation(FileOperation::Delete, &"/root/b".into());
        assert_eq!(
            sink.requests(),
            &[
                (FileOperation::Copy, NodePath::from("/root/a")),
                (FileOperation::Delete, NodePath::from("/root/b")),
            ]
        );
    }
}
