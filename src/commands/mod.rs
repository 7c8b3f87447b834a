//! Command implementations behind the CLI.

mod config;
mod list;
mod show;

pub use config::{cmd_config_path, cmd_config_show};
pub use list::{ListOptions, cmd_list, run_list};
pub use show::{cmd_show, run_show};

use serde::Serialize;

use crate::api::PokeApiClient;
use crate::app::Session;
use crate::config::Config;
use crate::error::Result;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Session against the live API using the effective configuration
pub fn open_session(config: &Config) -> Result<Session<PokeApiClient>> {
    let client = PokeApiClient::from_config(config)?;
    Ok(Session::new(client, config))
}
