//! The NFT workflow: minting from an asset file, lookups, transfers and re-pinning.

use crate::{
    contract::{ChainNft, NftContract},
    deployment::DeploymentRecord,
    types::{MintedNft, NftInfo, NftMetadata, NftOptions, PinnedNft, ShowOptions},
};
use alloy_primitives::{Address, B256, U256};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use eyre::{OptionExt, Result, WrapErr};
use minty_common::{
    ContentStore, IpfsClient,
    ipfs::{ensure_ipfs_uri_prefix, make_gateway_url, strip_ipfs_uri_prefix},
};
use minty_config::Config;

/// Directory uploads are placed in.
const UPLOAD_DIR: &str = "/nft";

/// File name of the metadata document inside its upload.
const METADATA_FILE_NAME: &str = "metadata.json";

/// Mints, shows, transfers and pins NFTs of one deployed contract.
#[derive(Debug)]
pub struct Minty<C = ChainNft, S = IpfsClient> {
    record: DeploymentRecord,
    contract: C,
    store: S,
    gateway: String,
}

impl Minty {
    /// Loads the deployment record and connects to the chain and the IPFS API.
    pub async fn connect(config: &Config) -> Result<Self> {
        let record = DeploymentRecord::load(&config.deployment_file).await?;
        let contract = ChainNft::connect(&record, config)?;

        let mut store = IpfsClient::new(&config.ipfs_api_url)?;
        if let Some((key, secret)) = config.ipfs_credentials() {
            store = store.with_credentials(key, secret.map(str::to_string));
        }
        debug!(address = %record.contract_address, "connected to NFT contract");
        Ok(Self::new(record, contract, store, config.ipfs_gateway_url.clone()))
    }
}

impl<C: NftContract, S: ContentStore> Minty<C, S> {
    pub fn new(
        record: DeploymentRecord,
        contract: C,
        store: S,
        gateway: impl Into<String>,
    ) -> Self {
        Self { record, contract, store, gateway: gateway.into() }
    }

    pub fn record(&self) -> &DeploymentRecord {
        &self.record
    }

    /// Uploads the asset and its metadata, then mints a token pointing at the metadata.
    pub async fn mint(&self, options: &NftOptions) -> Result<MintedNft> {
        let path = options.asset_path();
        let content = tokio::fs::read(path)
            .await
            .wrap_err_with(|| format!("failed to read asset {}", path.display()))?;

        let file_name = options.asset_file_name();
        let asset_uri = self.upload(file_name, content).await?;
        let metadata = NftMetadata {
            name: options.name.clone(),
            description: options.description.clone(),
            image: Some(asset_uri.clone()),
        };
        let metadata_uri = self.upload(METADATA_FILE_NAME, serde_json::to_vec(&metadata)?).await?;

        let owner_address = match options.owner {
            Some(owner) => owner,
            None => self.contract.default_owner()?,
        };
        let token_id = self.contract.mint_token(owner_address, &metadata_uri).await?;
        info!(%token_id, owner = %owner_address, "minted token");

        Ok(MintedNft {
            token_id,
            owner_address,
            metadata,
            asset_gateway_url: self.gateway_url(&asset_uri),
            asset_uri,
            metadata_gateway_url: self.gateway_url(&metadata_uri),
            metadata_uri,
        })
    }

    /// Looks up a token's owner and metadata.
    pub async fn show(&self, token_id: U256, options: ShowOptions) -> Result<NftInfo> {
        let metadata_uri = self.contract.token_uri(token_id).await?;
        let owner_address = self.contract.owner_of(token_id).await?;
        let (metadata, _) = self.fetch_metadata(&metadata_uri).await?;

        let asset_uri = metadata.image.as_deref().map(ensure_ipfs_uri_prefix);
        let asset_data_base64 = match &asset_uri {
            Some(uri) if options.fetch_asset => {
                let data = self.store.cat(strip_ipfs_uri_prefix(uri)).await?;
                Some(BASE64.encode(data))
            }
            _ => None,
        };
        let creation_info = if options.fetch_creation_info {
            Some(self.contract.creation_info(token_id).await?)
        } else {
            None
        };

        Ok(NftInfo {
            token_id,
            owner_address,
            metadata_gateway_url: self.gateway_url(&metadata_uri),
            metadata_uri,
            asset_gateway_url: asset_uri.as_deref().map(|uri| self.gateway_url(uri)),
            asset_uri,
            asset_data_base64,
            creation_info,
            metadata,
        })
    }

    /// Transfers `token_id` to `to`, returning the transaction hash.
    pub async fn transfer(&self, token_id: U256, to: Address) -> Result<B256> {
        let tx_hash = self.contract.transfer(token_id, to).await?;
        info!(%token_id, %to, %tx_hash, "transferred token");
        Ok(tx_hash)
    }

    /// Uploads a token's asset and metadata again, so they stay pinned.
    pub async fn pin(&self, token_id: U256) -> Result<PinnedNft> {
        let metadata_uri = self.contract.token_uri(token_id).await?;
        let (metadata, metadata_bytes) = self.fetch_metadata(&metadata_uri).await?;
        let image = metadata.image.as_deref().ok_or_eyre("token metadata has no image")?;

        let asset_path = strip_ipfs_uri_prefix(image).trim_start_matches("/ipfs/");
        let asset = self.store.cat(asset_path).await?;
        let file_name = asset_path.rsplit('/').next().unwrap_or(asset_path);

        let asset_uri = self.upload(file_name, asset).await?;
        let metadata_uri = self.upload(METADATA_FILE_NAME, metadata_bytes).await?;
        info!(%token_id, %asset_uri, %metadata_uri, "pinned token data");
        Ok(PinnedNft { asset_uri, metadata_uri })
    }

    /// Adds `content` as `/nft/<file_name>` and returns its `ipfs://<cid>/<file_name>` URI.
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String> {
        let cid = self.store.add(&format!("{UPLOAD_DIR}/{file_name}"), content).await?;
        Ok(ensure_ipfs_uri_prefix(&format!("{cid}/{file_name}")))
    }

    async fn fetch_metadata(&self, uri: &str) -> Result<(NftMetadata, Vec<u8>)> {
        let data = self.store.cat(strip_ipfs_uri_prefix(uri)).await?;
        let metadata = serde_json::from_slice(&data)
            .wrap_err_with(|| format!("invalid NFT metadata at {uri}"))?;
        Ok((metadata, data))
    }

    fn gateway_url(&self, uri: &str) -> String {
        make_gateway_url(&self.gateway, uri)
    }
}
