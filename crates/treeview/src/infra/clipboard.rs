//! Clipboard access for the `copy` operation, with shell fallbacks for headless sessions.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};

/// Which mechanism last succeeded in placing text on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    System,
    Command(&'static str),
}

/// System clipboard handle that degrades to `pbcopy`/`xclip`/`wl-copy`/PowerShell.
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::debug!(error = %err, "system clipboard unavailable");
                None
            }
        };
        Self { system }
    }

    /// Place `text` on the clipboard and report which backend took it.
    pub fn copy(&mut self, text: &str) -> Result<ClipboardBackend> {
        if let Some(system) = self.system.as_mut() {
            match system.set_text(text.to_owned()) {
                Ok(()) => return Ok(ClipboardBackend::System),
                Err(err) => {
                    tracing::warn!(error = %err, "system clipboard rejected text; trying commands");
                    self.system = None;
                }
            }
        }

        for command in fallback_commands() {
            match pipe_to_command(command, text) {
                Ok(()) => return Ok(ClipboardBackend::Command(command[0])),
                Err(err) => tracing::debug!(error = %err, program = command[0], "clipboard command failed"),
            }
        }

        Err(anyhow!("no clipboard backend accepted the text"))
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn pipe_to_command(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("failed to write to {program}"))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("{program} did not exit cleanly"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{program} exited with status {status}"))
    }
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["wl-copy"], &["xclip", "-selection", "clipboard"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fallback_names_a_program() {
        assert!(fallback_commands().iter().all(|command| !command.is_empty()));
    }

    #[test]
    fn missing_program_is_reported() {
        let err = pipe_to_command(&["treeview-no-such-clipboard-tool"], "x").unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(pipe_to_command(&[], "x").is_err());
    }
}
