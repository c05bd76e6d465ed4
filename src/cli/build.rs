// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{eyre, WrapErr};

use crate::{
    cli::read_document,
    config, environment,
    html_flake::{self, PageOptions},
    storage::Storage,
    transcode,
};

#[derive(clap::Args)]
pub struct BuildCommand {
    /// Path to the document (e.g., "paper.tex").
    #[arg(required = true)]
    document: Utf8PathBuf,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    config: String,
}

/// This function invoked the [`environment::init_environment`] function to initialize the environment.
pub fn build(command: &BuildCommand) -> eyre::Result<()> {
    environment::init_environment(command.config.as_str().into())?;
    let page = build_preview(&command.document)?;
    println!("Built preview: {}", page);
    Ok(())
}

/// Render the document into its standalone preview page and return the page path.
pub fn build_preview(document: &Utf8Path) -> eyre::Result<Utf8PathBuf> {
    let source = read_document(document)?;
    let storage = Storage::load_or_default(&environment::storage_path());

    let html = html_flake::html_doc(&transcode::to_html(&source), &page_options(&storage));
    let page = environment::preview_path(document);
    std::fs::write(&page, html).wrap_err_with(|| eyre!("failed to write preview `{}`", page))?;
    Ok(page)
}

pub fn page_options(storage: &Storage) -> PageOptions<'static> {
    PageOptions {
        title: environment::preview_title(),
        font_size: storage.font_size(environment::font_size()),
        dark_mode: storage.dark_mode,
        math_script: environment::math_script(),
    }
}
