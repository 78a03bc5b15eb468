//! Subcommands of the `minty` binary.

use eyre::Result;
use minty::types::NftMetadata;
use minty_config::Config;
use std::path::Path;

pub mod deploy;
pub mod mint;
pub mod pin;
pub mod show;
pub mod transfer;

/// Loads the config, reading `file` instead of `minty.toml` when given.
pub fn load_config(file: Option<&Path>) -> Result<Config> {
    let config = match file {
        Some(file) => Config::load_with_file(file)?,
        None => Config::load()?,
    };
    trace!(?config, "loaded config");
    Ok(config)
}

/// Prints the metadata document below a result.
fn print_metadata(metadata: &NftMetadata) -> Result<()> {
    println!("NFT Metadata:");
    println!("{}", serde_json::to_string_pretty(metadata)?);
    Ok(())
}
