// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

/// External commands receive the standalone preview page as `<input>` and
/// write the rasterized file to `<output>`. Placeholders may appear inside
/// an argument, e.g. `--screenshot=<output>`.
#[derive(Deserialize, Debug, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Export {
    pub output: String,

    /// Used when `export` is run without `--format`.
    pub format: ExportFormat,

    pub image_command: Vec<String>,
    pub pdf_command: Vec<String>,
}

impl Default for Export {
    fn default() -> Self {
        Self {
            output: "./export".to_string(),
            format: ExportFormat::default(),
            image_command: [
                "chromium",
                "--headless",
                "--disable-gpu",
                "--hide-scrollbars",
                "--virtual-time-budget=5000",
                "--window-size=1240,1754",
                "--screenshot=<output>",
                "<input>",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            pdf_command: [
                "chromium",
                "--headless",
                "--disable-gpu",
                "--virtual-time-budget=5000",
                "--no-pdf-header-footer",
                "--print-to-pdf=<output>",
                "<input>",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
