// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::Utf8PathBuf;
use eyre::{bail, WrapErr};

use crate::{
    cli::edit::EditState,
    config::{self, Config},
    environment,
    template::Template,
};

#[derive(clap::Args)]
pub struct NewCommand {
    /// Path to the new document.
    #[arg(required = true)]
    pub path: Utf8PathBuf,

    /// Template of the new document.
    #[arg(short, long, value_enum, default_value_t = Template::Article)]
    pub template: Template,

    /// Replace an existing document. The previous content can be restored with `undo`.
    #[arg(short, long, default_value_t = false)]
    pub force: bool,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    pub config: String,
}

/// This function invoked the [`environment::init_environment`] function to initialize the environment.
pub fn new_document(command: &NewCommand) -> eyre::Result<()> {
    environment::init_environment(command.config.as_str().into())?;

    let path = &command.path;
    let state = match path.exists() {
        true if !command.force => bail!("already exists: {}", path),
        true => {
            let mut state = EditState::open(path)?;
            state.session.load_template(command.template);
            state
        }
        false => EditState::with_source(path, command.template.source().to_string())?,
    };
    state.save()?;

    println!("Created new {} document at: {}", command.template, path);
    Ok(())
}

#[derive(clap::Args)]
pub struct NewConfigCommand {
    /// Path to the new configuration file.
    #[arg(default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    pub path: String,
}

pub fn new_config(command: &NewConfigCommand) -> eyre::Result<()> {
    let config_path = Utf8PathBuf::from(&command.path);
    if config_path.exists() {
        bail!("already exists: {}", config_path);
    }

    let config = Config::default();
    let toml = toml::to_string(&config).wrap_err("failed to serialize default config")?;

    environment::create_parent_dirs(&config_path);
    std::fs::write(&config_path, toml).wrap_err("failed to create default config file")?;
    println!("Created new config at: {}", config_path);
    Ok(())
}
