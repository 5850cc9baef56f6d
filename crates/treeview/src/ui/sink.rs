//! Host-side command sink: performs what a read-only terminal host can and reports the rest.

use crate::app::command::{CommandSink, FileOperation};
use crate::domain::model::NodePath;
use crate::infra::clipboard::{Clipboard, ClipboardBackend};
use crate::infra::config::ClipboardSettings;

/// Severity of host feedback shown in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Feedback produced by the host for the most recent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub level: StatusLevel,
    pub text: String,
}

/// Sink used by the terminal UI.
///
/// `copy` puts the target path on the clipboard when enabled. `delete` and `rename` are logged
/// and reported as not performed, since this host never touches the file system.
pub struct HostSink {
    copy_paths: bool,
    clipboard: Option<Clipboard>,
    outcome: Option<Outcome>,
}

impl HostSink {
    pub fn new(settings: &ClipboardSettings) -> Self {
        Self {
            copy_paths: settings.copy_paths,
            clipboard: None,
            outcome: None,
        }
    }

    /// Feedback for the last request, if not already taken.
    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.outcome.take()
    }

    fn copy_to_clipboard(&mut self, target: &NodePath) -> Outcome {
        let clipboard = self.clipboard.get_or_insert_with(Clipboard::new);
        match clipboard.copy(target.as_str()) {
            Ok(backend) => {
                let via = match backend {
                    ClipboardBackend::System => "system clipboard".to_string(),
                    ClipboardBackend::Command(program) => program.to_string(),
                };
                Outcome {
                    level: StatusLevel::Success,
                    text: format!("Copied {target} ({via})"),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, %target, "copy failed");
                Outcome {
                    level: StatusLevel::Error,
                    text: format!("Copy failed: {err}"),
                }
            }
        }
    }
}

impl CommandSink for HostSink {
    fn on_file_operation(&mut self, operation: FileOperation, target: &NodePath) {
        tracing::info!(%operation, %target, "host received file operation");
        let outcome = match operation {
            FileOperation::Copy if self.copy_paths => self.copy_to_clipboard(target),
            FileOperation::Copy => Outcome {
                level: StatusLevel::Info,
                text: format!("Copy requested for {target}"),
            },
            FileOperation::Delete | FileOperation::Rename => Outcome {
                level: StatusLevel::Info,
                text: format!(
                    "{} of {target} not performed: this view is read-only",
                    operation.label()
                ),
            },
        };
        self.outcome = Some(outcome);
    }
}
