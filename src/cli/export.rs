// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::Utf8PathBuf;

use crate::{
    cli::{build::page_options, read_document},
    config, environment,
    export::{self, ExportFormat},
    storage::Storage,
};

#[derive(clap::Args)]
pub struct ExportCommand {
    /// Path to the document (e.g., "paper.tex").
    #[arg(required = true)]
    document: Utf8PathBuf,

    /// Output format, defaults to `format` of the `[export]` section.
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output file, defaults to `<export-output>/<document-stem>.<format>`.
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    config: String,
}

pub fn export(command: &ExportCommand) -> eyre::Result<()> {
    environment::init_environment(command.config.as_str().into())?;

    let format = command.format.unwrap_or_else(environment::export_format);
    let source = read_document(&command.document)?;
    let storage = Storage::load_or_default(&environment::storage_path());

    let output = match &command.output {
        Some(output) => output.clone(),
        None => environment::export_path(&command.document, format.extension()),
    };
    let raster_command = match format {
        ExportFormat::Png => environment::image_command(),
        ExportFormat::Pdf => environment::pdf_command(),
        ExportFormat::Tex | ExportFormat::Txt | ExportFormat::Html => &[],
    };

    export::export(
        &source,
        format,
        &output,
        &page_options(&storage),
        raster_command,
    )?;
    println!("Exported {}: {}", format, output);
    Ok(())
}
