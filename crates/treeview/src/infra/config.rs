//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use toml::Table;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".treeview/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    pub glyphs: Glyphs,
    pub clipboard: ClipboardSettings,
    pub logging: Logging,
    pub keybindings: Keybindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Tree file shown when none is given on the command line.
    pub tree: Option<PathBuf>,
    pub separator: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            tree: None,
            separator: "/".into(),
        }
    }
}

/// Symbols drawn in front of rows and next to the selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub folder_open: String,
    pub folder_closed: String,
    pub file: String,
    pub selected: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            folder_open: "▾".into(),
            folder_closed: "▸".into(),
            file: "•".into(),
            selected: "◂".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Put the target path on the clipboard when `copy` is requested.
    pub copy_paths: bool,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self { copy_paths: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub up: String,
    pub down: String,
    pub activate: String,
    pub menu: String,
    pub quit: String,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: "k".into(),
            down: "j".into(),
            activate: "enter".into(),
            menu: "m".into(),
            quit: "q".into(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    tree: Option<String>,
    separator: Option<String>,
    log_level: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            tree: env::var("TREEVIEW_TREE").ok(),
            separator: env::var("TREEVIEW_SEPARATOR").ok(),
            log_level: env::var("TREEVIEW_LOG_LEVEL").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(tree: &str, separator: &str, log_level: &str) -> Self {
        Self {
            tree: Some(tree.to_owned()),
            separator: Some(separator.to_owned()),
            log_level: Some(log_level.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let layers: Vec<PathBuf> = [global_config_path(), workspace_config_path()?]
            .into_iter()
            .flatten()
            .filter(|path| path.exists())
            .collect();
        Self::load_with_layers(&layers, env)
    }

    /// Load defaults plus one explicitly named file (which must exist) and env overrides.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        Self::load_with_layers(&[path.to_path_buf()], EnvOverrides::from_env())
    }

    fn load_with_layers(layers: &[PathBuf], env_overrides: EnvOverrides) -> Result<Self> {
        let mut merged = parse_table(&DEFAULT_CONFIG).context("invalid built-in config")?;

        for path in layers {
            let layer = read_table(path)?;
            merge_tables(&mut merged, layer);
            tracing::debug!(path = %path.display(), "config layer applied");
        }

        let config: Config = toml::Value::Table(merged)
            .try_into()
            .context("config layers do not form a valid configuration")?;
        Ok(apply_env_overrides(config, env_overrides))
    }
}

fn read_table(path: &Path) -> Result<Table> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    parse_table(&data).with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

fn parse_table(contents: &str) -> Result<Table> {
    Ok(toml::from_str(contents)?)
}

/// Overlay `overlay` onto `base`; nested tables merge key by key, everything else replaces.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("treeview/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir().context("unable to determine working directory")?;
    Ok(Some(cwd.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(tree) = env.tree.filter(|value| !value.is_empty()) {
        config.defaults.tree = Some(PathBuf::from(tree));
    }
    if let Some(separator) = env.separator.filter(|value| !value.is_empty()) {
        config.defaults.separator = separator;
    }
    if let Some(level) = env.log_level.filter(|value| !value.is_empty()) {
        config.logging.level = level;
    }
    config
}
