// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

pub mod build;
pub mod edit;
pub mod export;
pub mod new;
pub mod view;
pub mod watch;

use camino::Utf8Path;
use eyre::{eyre, WrapErr};

use crate::environment;

pub fn read_document(document: &Utf8Path) -> eyre::Result<String> {
    std::fs::read_to_string(document)
        .wrap_err_with(|| eyre!("failed to read document `{}`", document))
}

pub fn write_document(document: &Utf8Path, source: &str) -> eyre::Result<()> {
    environment::create_parent_dirs(document);
    std::fs::write(document, source)
        .wrap_err_with(|| eyre!("failed to write document `{}`", document))
}
