//! Tracing subscriber setup.

use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing::level_filters::LevelFilter;

use crate::infra::config::Logging;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// The configured file, or `<cache dir>/treeview/treeview.log`, or `treeview.log` in the
    /// temp directory when no cache directory is known. Never stderr.
    pub fn for_terminal_ui(settings: &Logging) -> Self {
        terminal_ui_target(settings, dirs_next::cache_dir())
    }
}

fn terminal_ui_target(settings: &Logging, cache_dir: Option<PathBuf>) -> LogTarget {
    let path = settings.file.clone().unwrap_or_else(|| match cache_dir {
        Some(dir) => dir.join("treeview/treeview.log"),
        None => env::temp_dir().join("treeview.log"),
    });
    LogTarget::File(path)
}

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("invalid log level '{level}'"))
}

/// Install the global fmt subscriber. Calling it again after a successful install is an error.
pub fn init(settings: &Logging, target: LogTarget) -> Result<()> {
    let level = parse_level(&settings.level)?;
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    match target {
        LogTarget::Stderr => builder
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))?,
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))?
        }
    }
    Ok(())
}
