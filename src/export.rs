// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{bail, eyre, WrapErr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    environment,
    html_flake::{self, PageOptions},
    transcode,
};

pub const EMPTY_SOURCE_MESSAGE: &str = "Please write some content first!";
pub const EMPTY_DOCUMENT: &str = "Empty document";
pub const EXPORT_FAILED: &str = "Export failed";

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Default, Deserialize, Serialize)]
pub enum ExportFormat {
    #[serde(rename = "tex")]
    Tex,

    #[default]
    #[serde(rename = "txt")]
    Txt,

    #[serde(rename = "html")]
    Html,

    #[serde(rename = "png")]
    Png,

    #[serde(rename = "pdf")]
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Tex => "tex",
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Content of a text format export. Returns `None` for raster formats.
pub fn export_text(source: &str, format: ExportFormat, page: &PageOptions) -> Option<String> {
    match format {
        ExportFormat::Tex => Some(source.to_string()),
        ExportFormat::Txt => {
            let text = transcode::to_plain_text(source);
            match text.is_empty() {
                true => Some(EMPTY_DOCUMENT.to_string()),
                false => Some(text),
            }
        }
        ExportFormat::Html => Some(html_flake::html_doc(&transcode::to_html(source), page)),
        ExportFormat::Png | ExportFormat::Pdf => None,
    }
}

/// Write `source` in the given format to `output`.
///
/// Raster formats render the standalone page with the external `command`,
/// whose `<input>` and `<output>` placeholders are substituted.
pub fn export(
    source: &str,
    format: ExportFormat,
    output: &Utf8Path,
    page: &PageOptions,
    command: &[String],
) -> eyre::Result<()> {
    if source.trim().is_empty() {
        bail!(EMPTY_SOURCE_MESSAGE);
    }

    environment::create_parent_dirs(output);
    if let Some(content) = export_text(source, format, page) {
        return std::fs::write(output, content)
            .wrap_err_with(|| eyre!("failed to write `{}`", output));
    }

    let page_path = page_input_path(output)?;
    let html = html_flake::html_doc(&transcode::to_html(source), page);
    std::fs::write(&page_path, html)
        .wrap_err_with(|| eyre!("failed to write page to `{}`", page_path))?;

    // a stale file would hide a rasterizer that wrote nothing
    let _ = std::fs::remove_file(output);
    let result = rasterize(command, &page_path, output);
    let _ = std::fs::remove_file(&page_path);
    result
}

fn page_input_path(output: &Utf8Path) -> eyre::Result<Utf8PathBuf> {
    let temp_dir = Utf8PathBuf::try_from(std::env::temp_dir())
        .wrap_err("temporary directory is not valid UTF-8")?;
    let name = format!(
        "texpad-{}-{}.html",
        std::process::id(),
        crate::path_utils::file_stem(output)
    );
    Ok(temp_dir.join(name))
}

fn rasterize(command: &[String], input: &Utf8Path, output: &Utf8Path) -> eyre::Result<()> {
    let mut rasterizer = parse_command(command, input, output)?;
    let result = match rasterizer.output() {
        Ok(result) => result,
        Err(error) => {
            color_print::ceprintln!(
                "<r>[export] Error: failed to run `{}`: {}</>",
                command.iter().join(" "),
                error
            );
            bail!(EXPORT_FAILED);
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        for line in stderr.lines() {
            color_print::ceprintln!("<r>[export] Error: {}</>", line);
        }
        bail!(EXPORT_FAILED);
    }

    if !output.exists() {
        color_print::ceprintln!(
            "<r>[export] Error: `{}` finished without writing `{}`</>",
            command[0],
            output
        );
        bail!(EXPORT_FAILED);
    }
    Ok(())
}

fn parse_command(command: &[String], input: &Utf8Path, output: &Utf8Path) -> eyre::Result<Command> {
    let Some((program, args)) = command.split_first() else {
        bail!("export command is empty, check the `[export]` section of the config");
    };

    let mut rasterizer = Command::new(program);
    for arg in args {
        rasterizer.arg(
            arg.replace("<input>", input.as_str())
                .replace("<output>", output.as_str()),
        );
    }
    Ok(rasterizer)
}
