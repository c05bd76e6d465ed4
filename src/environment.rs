// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::{fs::create_dir_all, sync::OnceLock};

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{eyre, WrapErr};

use crate::{
    config::{self, Config},
    export::ExportFormat,
    path_utils,
};

pub struct Environment {
    /// Specifies the project root path.
    ///
    /// This is the directory of the toml configuration file, or the directory
    /// it was looked up in when no such file exists.
    pub root: Utf8PathBuf,
    pub config: Config,
}

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

fn get_environment() -> &'static Environment {
    ENVIRONMENT.get().expect("environment must be initialized")
}

fn get_config() -> &'static Config {
    &get_environment().config
}

pub fn init_environment(toml_file: Utf8PathBuf) -> eyre::Result<()> {
    let environment = match config::find_config(&toml_file)? {
        Some(toml_file) => {
            let toml = std::fs::read_to_string(&toml_file)
                .wrap_err_with(|| eyre!("failed to read config file `{}`", toml_file))?;
            Environment {
                root: root_of(&toml_file)?,
                config: config::parse_config(&toml)?,
            }
        }
        None => Environment {
            root: root_of(&toml_file)?,
            config: Config::default(),
        },
    };

    _ = ENVIRONMENT.set(environment);
    Ok(())
}

fn root_of(toml_file: &Utf8Path) -> eyre::Result<Utf8PathBuf> {
    let (root, _file_name) = path_utils::split_file_name(toml_file)
        .ok_or_else(|| eyre!("config path cannot be empty"))?;
    Ok(match root.as_str() {
        "" => Utf8PathBuf::from("."),
        _ => root.to_owned(),
    })
}

pub const CACHE_DIR_NAME: &str = ".cache";
pub const STATE_DIR_NAME: &str = "texpad";
pub const STORAGE_FILE_NAME: &str = "storage.json";

pub fn root_dir() -> &'static Utf8Path {
    &get_environment().root
}

pub fn get_cache_dir() -> Utf8PathBuf {
    root_dir().join(CACHE_DIR_NAME)
}

pub fn storage_path() -> Utf8PathBuf {
    get_cache_dir().join(STATE_DIR_NAME).join(STORAGE_FILE_NAME)
}

pub fn preview_dir() -> Utf8PathBuf {
    root_dir().join(&get_config().preview.output)
}

pub fn export_dir() -> Utf8PathBuf {
    root_dir().join(&get_config().export.output)
}

pub fn preview_title() -> &'static str {
    &get_config().preview.title
}

pub fn font_size() -> u32 {
    get_config().preview.font_size
}

pub fn math_script() -> &'static str {
    &get_config().preview.math_script
}

pub fn debounce_ms() -> u64 {
    get_config().preview.debounce_ms
}

pub fn export_format() -> ExportFormat {
    get_config().export.format
}

pub fn image_command() -> &'static [String] {
    &get_config().export.image_command
}

pub fn pdf_command() -> &'static [String] {
    &get_config().export.pdf_command
}

pub fn history_capacity() -> usize {
    get_config().history.capacity
}

pub fn create_parent_dirs<P: AsRef<Utf8Path>>(path: P) {
    if let Some(parent_dir) = path.as_ref().parent() {
        if !parent_dir.as_str().is_empty() && !parent_dir.exists() {
            let _ = create_dir_all(parent_dir);
        }
    }
}

/// Return the page path `<preview_dir>/<stem>.html` for the given document.
///
/// If the directory does not exist, it will be created.
pub fn preview_path<P: AsRef<Utf8Path>>(document: P) -> Utf8PathBuf {
    let mut path = preview_dir().join(path_utils::file_stem(document.as_ref()));
    path.set_extension("html");
    create_parent_dirs(&path);
    path
}

/// Return the export path `<export_dir>/<stem>.<extension>` for the given document.
///
/// If the directory does not exist, it will be created.
pub fn export_path<P: AsRef<Utf8Path>>(document: P, extension: &str) -> Utf8PathBuf {
    let mut path = export_dir().join(path_utils::file_stem(document.as_ref()));
    path.set_extension(extension);
    create_parent_dirs(&path);
    path
}

/// Key of a document in the persisted state.
pub fn document_key<P: AsRef<Utf8Path>>(document: P) -> String {
    let document = document.as_ref();
    let absolute = document.canonicalize_utf8().unwrap_or_else(|_| document.to_owned());
    let root = root_dir().canonicalize_utf8().unwrap_or_else(|_| root_dir().to_owned());
    match absolute.strip_prefix(&root) {
        Ok(relative) => path_utils::pretty_path(relative),
        Err(_) => path_utils::pretty_path(&absolute),
    }
}
