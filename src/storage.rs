// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::Utf8Path;
use eyre::{eyre, WrapErr};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{environment, history::History};

pub const ZOOM_STEP: u32 = 2;
pub const MIN_FONT_SIZE: u32 = 8;

/// Preferences and per-document histories kept between runs.
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Storage {
    pub dark_mode: bool,

    /// Font size in pixels chosen by zooming. `None` until the first zoom,
    /// so the configured size applies.
    pub font_size: Option<u32>,

    /// Keyed by document path.
    pub histories: IndexMap<String, History>,
}

impl Storage {
    /// A missing file is the default state.
    pub fn load(path: &Utf8Path) -> eyre::Result<Storage> {
        if !path.exists() {
            return Ok(Storage::default());
        }
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| eyre!("failed to read storage file `{}`", path))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| eyre!("failed to parse storage JSON from `{}`", path))
    }

    /// For commands that only read the preferences. A file that cannot be
    /// read or parsed is reported and replaced by the default state, it is
    /// left on disk as is.
    pub fn load_or_default(path: &Utf8Path) -> Storage {
        Storage::load(path).unwrap_or_else(|error| {
            color_print::ceprintln!("<y>Warning: {:#}, using default preferences.</>", error);
            Storage::default()
        })
    }

    pub fn save(&self, path: &Utf8Path) -> eyre::Result<()> {
        environment::create_parent_dirs(path);
        let serialized = serde_json::to_string_pretty(self)
            .wrap_err_with(|| eyre!("failed to serialize storage to JSON"))?;
        std::fs::write(path, serialized)
            .wrap_err_with(|| eyre!("failed to write storage to `{}`", path))
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn font_size(&self, configured: u32) -> u32 {
        self.font_size.unwrap_or(configured)
    }

    pub fn zoom_in(&mut self, configured: u32) -> u32 {
        let size = self.font_size(configured) + ZOOM_STEP;
        self.font_size = Some(size);
        size
    }

    /// Shrinks only while the size is above [`MIN_FONT_SIZE`].
    pub fn zoom_out(&mut self, configured: u32) -> u32 {
        let mut size = self.font_size(configured);
        if size > MIN_FONT_SIZE {
            size -= ZOOM_STEP;
        }
        self.font_size = Some(size);
        size
    }

    /// The stored history of `document` resized to `capacity`, or a new one.
    pub fn take_history(&mut self, document: &str, capacity: usize) -> History {
        let mut history = self
            .histories
            .shift_remove(document)
            .unwrap_or_else(|| History::new(capacity));
        history.set_capacity(capacity);
        history
    }

    pub fn put_history(&mut self, document: String, history: History) {
        self.histories.insert(document, history);
    }
}
