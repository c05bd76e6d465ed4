// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

pub mod export;
pub mod history;
pub mod preview;

use camino::{Utf8Path, Utf8PathBuf};
use export::Export;
use history::History;
use preview::Preview;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "./Texpad.toml";
pub const CONFIG_FILE_NAME: &str = "Texpad.toml";

#[derive(Deserialize, Debug, Default, Serialize)]
pub struct Config {
    #[serde(default)]
    pub preview: Preview,

    #[serde(default)]
    pub export: Export,

    #[serde(default)]
    pub history: History,
}

/// Try to find toml file at the given path or in the parent directory.
///
/// Returns `None` if neither exists, so the defaults apply.
pub fn find_config(toml_file: &Utf8Path) -> eyre::Result<Option<Utf8PathBuf>> {
    if toml_file.exists() {
        return Ok(Some(toml_file.to_owned()));
    }

    let parent = match toml_file.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let Ok(parent) = parent.canonicalize_utf8() else {
        return Ok(None);
    };

    let fallback = match parent.parent() {
        Some(grandparent) => grandparent.join(CONFIG_FILE_NAME),
        None => return Ok(None),
    };
    Ok(fallback.exists().then_some(fallback))
}

pub fn parse_config(config: &str) -> eyre::Result<Config> {
    let config: Config =
        toml::from_str(config).map_err(|e| eyre::eyre!("failed to parse config file: {}", e))?;
    Ok(config)
}
