//! Inputs and results of the NFT operations.

use alloy_primitives::{Address, U256};
use eyre::{OptionExt, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name used for a mint when none is given.
pub const DEFAULT_NFT_NAME: &str = "Test Mint";

/// Description used for a mint when none is given.
pub const DEFAULT_NFT_DESCRIPTION: &str = "A basic test of mint";

/// Inputs of a single mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftOptions {
    pub name: String,
    pub description: String,
    /// Owner of the new token; the signer's address when `None`.
    pub owner: Option<Address>,
    asset_path: PathBuf,
    asset_file_name: String,
}

impl NftOptions {
    /// Creates the options for minting the file at `asset_path`.
    ///
    /// Fails if the path does not end in a file name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: Option<Address>,
        asset_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let asset_path = asset_path.into();
        let asset_file_name = asset_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_eyre(format!("asset path {} does not name a file", asset_path.display()))?;
        Ok(Self {
            name: name.into(),
            description: description.into(),
            owner,
            asset_path,
            asset_file_name,
        })
    }

    pub fn asset_path(&self) -> &Path {
        &self.asset_path
    }

    /// The base file name of the asset, used as its name inside the content store.
    pub fn asset_file_name(&self) -> &str {
        &self.asset_file_name
    }
}

/// The JSON metadata document a token's URI points to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `ipfs://` URI of the asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Result of a successful mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedNft {
    pub token_id: U256,
    pub owner_address: Address,
    pub metadata: NftMetadata,
    pub asset_uri: String,
    pub asset_gateway_url: String,
    pub metadata_uri: String,
    pub metadata_gateway_url: String,
}

/// Where and by whom a token was minted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationInfo {
    pub creator_address: Address,
    pub block_number: u64,
}

/// What `show` should fetch beyond the token's metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowOptions {
    /// Download the asset and include it base64 encoded.
    pub fetch_asset: bool,
    /// Look up the mint event.
    pub fetch_creation_info: bool,
}

/// Everything known about an existing token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftInfo {
    pub token_id: U256,
    pub owner_address: Address,
    pub metadata: NftMetadata,
    pub metadata_uri: String,
    pub metadata_gateway_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_gateway_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_data_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_info: Option<CreationInfo>,
}

/// Content URIs re-uploaded by `pin`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedNft {
    pub asset_uri: String,
    pub metadata_uri: String,
}
