// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

mod cli;
mod config;
mod environment;
mod export;
mod history;
mod html_flake;
mod path_utils;
mod session;
mod storage;
mod template;
mod transcode;

use clap::Parser;

use crate::cli::{
    build::BuildCommand,
    edit::{HistoryCommand, InsertCommand},
    export::ExportCommand,
    new::{NewCommand, NewConfigCommand},
    view::ViewCommand,
    watch::WatchCommand,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a new document from a template.
    #[command(visible_alias = "n")]
    New(NewCommand),

    /// Render the preview page of a document.
    #[command(visible_alias = "b")]
    Build(BuildCommand),

    /// Export a document as LaTeX, plain text, HTML, PNG or PDF.
    #[command(visible_alias = "e")]
    Export(ExportCommand),

    /// Rebuild the preview page whenever the document changes.
    #[command(visible_alias = "w")]
    Watch(WatchCommand),

    /// Insert a snippet at the selection, or wrap the selection.
    #[command(visible_alias = "i")]
    Insert(InsertCommand),

    /// Restore an earlier version of a document.
    #[command(visible_alias = "u")]
    Undo(HistoryCommand),

    /// Reapply an undone change.
    #[command(visible_alias = "r")]
    Redo(HistoryCommand),

    /// Toggle dark mode or zoom the preview.
    #[command(visible_alias = "v")]
    View(ViewCommand),

    /// Create a new config file.
    #[command(visible_alias = "c")]
    Config(NewConfigCommand),
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::New(command) => crate::cli::new::new_document(command)?,
        Command::Build(command) => crate::cli::build::build(command)?,
        Command::Export(command) => crate::cli::export::export(command)?,
        Command::Watch(command) => crate::cli::watch::watch(command)?,
        Command::Insert(command) => crate::cli::edit::insert(command)?,
        Command::Undo(command) => crate::cli::edit::undo(command)?,
        Command::Redo(command) => crate::cli::edit::redo(command)?,
        Command::View(command) => crate::cli::view::view(command)?,
        Command::Config(command) => crate::cli::new::new_config(command)?,
    };
    Ok(())
}
