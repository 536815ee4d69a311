//! `taskvault init`: writes the configuration file.
//!
//! By default it runs an interactive setup wizard for the tasks file location,
//! the export directory, backup retention and auto-save.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the default configuration without prompting
    #[arg(short, long)]
    defaults: bool,
}

/// Fails if the wizard is interrupted or the file cannot be written.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    let config = if init_args.defaults {
        Config::default()
    } else {
        Config::init()?
    };
    config.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
