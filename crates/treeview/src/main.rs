use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use treeview::app::render::render;
use treeview::app::state::InteractionState;
use treeview::infra::config::Config;
use treeview::infra::logging::{self, LogTarget};
use treeview::infra::tree_file;
use treeview::ui::app::UiApp;
use treeview::ui::text::to_text;

#[derive(Parser)]
#[command(author, version, about = "Browse a file/folder tree in the terminal", long_about = None)]
struct Cli {
    /// Tree document (.json, .yaml, .yml or .toml). Defaults to the configured or built-in tree
    tree: Option<PathBuf>,
    /// Config file layered over the built-in defaults instead of the global and workspace files
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Separator placed between names in node paths
    #[arg(long)]
    separator: Option<String>,
    /// Print the rendered tree once and exit instead of starting the interactive view
    #[arg(long)]
    print: bool,
    /// Folder path to toggle open before printing (repeatable)
    #[arg(long = "toggle", value_name = "PATH", requires = "print")]
    toggle: Vec<String>,
    /// File path to mark selected before printing
    #[arg(long, value_name = "PATH", requires = "print")]
    select: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "treeview", &mut io::stdout());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load()?,
    };
    if let Some(separator) = cli.separator {
        config.defaults.separator = separator;
    }

    let target = if cli.print {
        LogTarget::Stderr
    } else {
        LogTarget::for_terminal_ui(&config.logging)
    };
    logging::init(&config.logging, target)?;

    let tree = match cli.tree.or_else(|| config.defaults.tree.clone()) {
        Some(path) => tree_file::load(&path, &config.defaults.separator)?,
        None => tree_file::sample(&config.defaults.separator)?,
    };

    if cli.print {
        let mut state = InteractionState::new();
        for path in &cli.toggle {
            match tree.find(path) {
                Some(node) if node.is_folder() => {}
                Some(_) => tracing::warn!(%path, "--toggle names a file; it renders no differently"),
                None => tracing::warn!(%path, "--toggle names no node in the tree"),
            }
            state.toggle_folder(&path.as_str().into());
        }
        if let Some(path) = &cli.select {
            match tree.find(path) {
                Some(node) if !node.is_folder() => {}
                Some(_) => tracing::warn!(%path, "--select names a folder; no row will be marked"),
                None => tracing::warn!(%path, "--select names no node in the tree"),
            }
            state.select_file(&path.as_str().into());
        }
        println!("{}", to_text(&render(&tree, &state), &config.glyphs));
        return Ok(());
    }

    let mut app = UiApp::new(config, tree);
    app.run()
}
