// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MATH_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js";

#[derive(Deserialize, Debug, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Preview {
    pub title: String,
    pub font_size: u32,
    pub math_script: String,

    /// Changes arriving within this window trigger a single rebuild.
    pub debounce_ms: u64,

    pub output: String,
}

impl Default for Preview {
    fn default() -> Self {
        Self {
            title: "Texpad Preview".to_string(),
            font_size: 16,
            math_script: DEFAULT_MATH_SCRIPT.to_string(),
            debounce_ms: 300,
            output: "./.cache/texpad/preview".to_string(),
        }
    }
}
