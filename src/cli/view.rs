// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::Utf8PathBuf;

use crate::{cli::build::build_preview, config, environment, storage::Storage};

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
pub enum ViewAction {
    /// Toggle dark mode.
    Dark,

    /// Increase the font size by 2px.
    ZoomIn,

    /// Decrease the font size by 2px, down to 8px.
    ZoomOut,

    /// Print the current settings.
    Show,
}

#[derive(clap::Args)]
pub struct ViewCommand {
    #[arg(value_enum)]
    action: ViewAction,

    /// Rebuild the preview page of this document afterwards.
    document: Option<Utf8PathBuf>,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    config: String,
}

pub fn view(command: &ViewCommand) -> eyre::Result<()> {
    environment::init_environment(command.config.as_str().into())?;

    let storage_path = environment::storage_path();
    let mut storage = Storage::load(&storage_path)?;
    let configured = environment::font_size();

    match command.action {
        ViewAction::Dark => {
            storage.toggle_dark_mode();
        }
        ViewAction::ZoomIn => {
            storage.zoom_in(configured);
        }
        ViewAction::ZoomOut => {
            storage.zoom_out(configured);
        }
        ViewAction::Show => (),
    }
    if !matches!(command.action, ViewAction::Show) {
        storage.save(&storage_path)?;
    }

    let mode = match storage.dark_mode {
        true => "dark",
        false => "light",
    };
    println!("{} mode, {}px", mode, storage.font_size(configured));

    if let Some(document) = &command.document {
        let page = build_preview(document)?;
        println!("Built preview: {}", page);
    }
    Ok(())
}
