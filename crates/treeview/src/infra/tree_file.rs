//! Loading tree models from JSON, YAML, or TOML documents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;

use crate::domain::model::{Node, TreeModel};

static SAMPLE_TREE: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/sample-tree.json"));

/// Document formats a tree can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Json,
    Yaml,
    Toml,
}

impl TreeFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(TreeFormat::Json),
            Some("yaml" | "yml") => Ok(TreeFormat::Yaml),
            Some("toml") => Ok(TreeFormat::Toml),
            Some(other) => bail!("unsupported tree file extension '.{other}'"),
            None => bail!("tree file {} has no extension", path.display()),
        }
    }

    pub fn parse(self, contents: &str) -> Result<Node> {
        let node: Node = match self {
            TreeFormat::Json => serde_json::from_str(contents)?,
            TreeFormat::Yaml => serde_yaml::from_str(contents)?,
            TreeFormat::Toml => toml::from_str(contents)?,
        };
        Ok(node)
    }
}

/// Read and validate the tree stored at `path`.
pub fn load(path: &Path, separator: &str) -> Result<TreeModel> {
    let format = TreeFormat::from_path(path)?;
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tree file {}", path.display()))?;
    let root = format
        .parse(&contents)
        .with_context(|| format!("invalid tree document in {}", path.display()))?;
    build(root, separator).with_context(|| format!("invalid tree in {}", path.display()))
}

/// The built-in demo tree shown when no file is configured.
pub fn sample(separator: &str) -> Result<TreeModel> {
    let root = TreeFormat::Json
        .parse(&SAMPLE_TREE)
        .context("built-in sample tree is malformed")?;
    build(root, separator)
}

fn build(root: Node, separator: &str) -> Result<TreeModel> {
    let tree = TreeModel::with_separator(root, separator)?;
    for path in tree.duplicate_paths() {
        tracing::warn!(%path, "several nodes share this path; they will expand and select together");
    }
    Ok(tree)
}
