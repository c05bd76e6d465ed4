// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::{
    io::Write,
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{eyre, WrapErr};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::{cli::build::build_preview, config, environment};

#[derive(clap::Args)]
pub struct WatchCommand {
    /// Path to the document (e.g., "paper.tex").
    #[arg(required = true)]
    document: Utf8PathBuf,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    config: String,
}

/// This function invoked the [`environment::init_environment`] function to initialize the environment.
pub fn watch(command: &WatchCommand) -> eyre::Result<()> {
    environment::init_environment(command.config.as_str().into())?;

    let document = &command.document;
    let rebuild = || -> eyre::Result<()> {
        let page = build_preview(document)?;
        println!("[watch] Built preview: {}", page);
        Ok(())
    };
    rebuild()?;

    let debounce = Duration::from_millis(environment::debounce_ms());
    watch_document(document, debounce, rebuild)
}

/// from: https://github.com/notify-rs/notify/blob/main/examples/monitor_raw.rs#L18
fn watch_document<F>(document: &Utf8Path, debounce: Duration, action: F) -> eyre::Result<()>
where
    F: Fn() -> eyre::Result<()>,
{
    let document = document
        .canonicalize_utf8()
        .wrap_err_with(|| eyre!("failed to resolve document `{}`", document))?;
    let parent = document
        .parent()
        .ok_or_else(|| eyre!("document `{}` has no parent directory", document))?;

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;

    // Editors often save by replacing the file, so the directory is watched.
    watcher.watch(parent.as_std_path(), RecursiveMode::NonRecursive)?;
    println!("[watch] \"{}\"\n\nPress Ctrl+C to stop watching.\n", document);

    while let Ok(res) = rx.recv() {
        match res {
            Ok(event) if touches(&event, &document) => {
                if !settle(&rx, debounce) {
                    break;
                }
                println!("[watch] Change: {}", document);
                std::io::stdout().flush()?;
                if let Err(error) = action() {
                    color_print::ceprintln!("<r>[watch] Error: {:?}</>", error);
                }
            }
            Ok(_) => (),
            Err(error) => {
                color_print::ceprintln!("<r>[watch] Error: {:?}</>", error);
            }
        }
    }

    Ok(())
}

fn touches(event: &Event, document: &Utf8Path) -> bool {
    // notify-rs only reports `Modify(Any)` on Windows, so every kind of
    // modification counts.
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|path| path == document.as_std_path())
}

/// Wait until no message arrived for `window`, discarding the ones that did.
///
/// Returns `false` once the channel is disconnected.
fn settle<T>(rx: &Receiver<T>, window: Duration) -> bool {
    loop {
        match rx.recv_timeout(window) {
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout) => return true,
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }
}
