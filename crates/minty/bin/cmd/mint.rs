use super::print_metadata;
use alloy_primitives::Address;
use clap::{Parser, ValueHint};
use eyre::Result;
use minty::{
    NftOptions, Session,
    types::{DEFAULT_NFT_DESCRIPTION, DEFAULT_NFT_NAME},
};
use minty_common::fmt::align_rows;
use std::path::PathBuf;
use yansi::Paint;

/// CLI arguments for `minty mint`.
#[derive(Clone, Debug, Parser)]
pub struct MintArgs {
    /// Path to the asset file, e.g. an image.
    #[arg(value_hint = ValueHint::FilePath)]
    pub asset_path: PathBuf,

    /// The name of the NFT.
    #[arg(long, short, default_value = DEFAULT_NFT_NAME)]
    pub name: String,

    /// A description of the NFT.
    #[arg(long, short, default_value = DEFAULT_NFT_DESCRIPTION)]
    pub description: String,

    /// The address that should own the NFT. Defaults to the signer.
    #[arg(long, short)]
    pub owner: Option<Address>,
}

impl MintArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let Self { asset_path, name, description, owner } = self;
        let options = NftOptions::new(name, description, owner, asset_path)?;

        let minty = session.minty().await?;
        let nft = minty.mint(&options).await?;

        println!("{}", "🌿 Minted a new NFT:".green());
        println!(
            "{}",
            align_rows(&[
                ("Token ID:", nft.token_id.to_string()),
                ("Owner Address:", nft.owner_address.to_string()),
                ("Metadata Address:", nft.metadata_uri.clone()),
                ("Metadata Gateway URL:", nft.metadata_gateway_url.clone()),
                ("Asset Address:", nft.asset_uri.clone()),
                ("Asset Gateway URL:", nft.asset_gateway_url.clone()),
            ])
        );
        print_metadata(&nft.metadata)
    }
}
