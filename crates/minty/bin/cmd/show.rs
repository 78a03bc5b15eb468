use super::print_metadata;
use alloy_primitives::U256;
use clap::Parser;
use eyre::Result;
use minty::{Session, ShowOptions};
use minty_common::fmt::align_rows;

/// CLI arguments for `minty show`.
#[derive(Clone, Debug, Parser)]
pub struct ShowArgs {
    /// The id of the token.
    pub token_id: U256,

    /// Include the creator address and the block the NFT was minted in.
    #[arg(long, short)]
    pub creation_info: bool,

    /// Download the asset and print it base64 encoded.
    #[arg(long, short = 'a')]
    pub fetch_asset: bool,
}

impl ShowArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let Self { token_id, creation_info, fetch_asset } = self;
        let options = ShowOptions { fetch_asset, fetch_creation_info: creation_info };

        let minty = session.minty().await?;
        let nft = minty.show(token_id, options).await?;

        let mut rows = vec![
            ("Token ID:", nft.token_id.to_string()),
            ("Owner Address:", nft.owner_address.to_string()),
        ];
        if let Some(info) = &nft.creation_info {
            rows.push(("Creator Address:", info.creator_address.to_string()));
            rows.push(("Block Number:", info.block_number.to_string()));
        }
        rows.push(("Metadata Address:", nft.metadata_uri.clone()));
        rows.push(("Metadata Gateway URL:", nft.metadata_gateway_url.clone()));
        if let (Some(uri), Some(url)) = (&nft.asset_uri, &nft.asset_gateway_url) {
            rows.push(("Asset Address:", uri.clone()));
            rows.push(("Asset Gateway URL:", url.clone()));
        }
        if let Some(data) = &nft.asset_data_base64 {
            rows.push(("Asset Data (base64):", data.clone()));
        }
        println!("{}", align_rows(&rows));
        print_metadata(&nft.metadata)
    }
}
