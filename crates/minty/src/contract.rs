//! Binding to the deployed NFT contract.

use crate::{deployment::DeploymentRecord, types::CreationInfo};
use alloy_contract::{ContractInstance, Interface};
use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::{DynProvider, Provider};
use alloy_rpc_types::{BlockNumberOrTag, Filter, Log, TransactionReceipt};
use alloy_sol_types::{SolEvent, sol};
use async_trait::async_trait;
use eyre::{OptionExt, Result, WrapErr, eyre};
use minty_common::{get_http_provider, get_signing_provider, parse_private_key};
use minty_config::Config;

sol! {
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
}

/// The on-chain operations minty needs from an ERC-721 contract.
#[async_trait]
pub trait NftContract: Send + Sync {
    /// Address of the contract.
    fn address(&self) -> Address;

    /// The account that owns newly minted tokens unless told otherwise.
    fn default_owner(&self) -> Result<Address>;

    /// Mints a token owned by `owner` pointing at `metadata_uri` and returns its id.
    async fn mint_token(&self, owner: Address, metadata_uri: &str) -> Result<U256>;

    async fn token_uri(&self, token_id: U256) -> Result<String>;

    async fn owner_of(&self, token_id: U256) -> Result<Address>;

    /// Transfers `token_id` from its current owner to `to`, returning the transaction hash.
    async fn transfer(&self, token_id: U256, to: Address) -> Result<B256>;

    /// Finds the mint of `token_id`.
    async fn creation_info(&self, token_id: U256) -> Result<CreationInfo>;
}

/// [`NftContract`] over JSON-RPC, bound to the ABI stored in the deployment record.
#[derive(Clone)]
pub struct ChainNft {
    contract: ContractInstance<DynProvider>,
    signer: Option<Address>,
}

impl ChainNft {
    pub fn new(
        address: Address,
        abi: JsonAbi,
        provider: DynProvider,
        signer: Option<Address>,
    ) -> Self {
        Self { contract: ContractInstance::new(address, provider, Interface::new(abi)), signer }
    }

    /// Connects to the contract described by `record`, signing with the configured key if any.
    pub fn connect(record: &DeploymentRecord, config: &Config) -> Result<Self> {
        let (provider, signer) = match config.private_key() {
            Some(key) => {
                let signer = parse_private_key(key)?;
                let address = signer.address();
                (get_signing_provider(&config.eth_rpc_url, signer)?, Some(address))
            }
            None => (get_http_provider(&config.eth_rpc_url)?, None),
        };
        Ok(Self::new(record.contract_address, record.abi.clone(), provider, signer))
    }

    fn signer(&self) -> Result<Address> {
        self.signer.ok_or_eyre("no private key configured; set `private_key` or ETH_PRIVATE_KEY")
    }

    async fn call(&self, name: &str, args: &[DynSolValue]) -> Result<DynSolValue> {
        trace!(name, "calling contract");
        let output = self
            .contract
            .function(name, args)?
            .call()
            .await
            .wrap_err_with(|| format!("failed to call `{name}`"))?;
        output.into_iter().next().ok_or_else(|| eyre!("`{name}` returned nothing"))
    }

    async fn send(&self, name: &str, args: &[DynSolValue]) -> Result<TransactionReceipt> {
        let from = self.signer()?;
        debug!(name, %from, "sending transaction");
        let receipt = self
            .contract
            .function(name, args)?
            .from(from)
            .send()
            .await
            .wrap_err_with(|| format!("failed to send `{name}` transaction"))?
            .get_receipt()
            .await?;
        eyre::ensure!(
            receipt.status(),
            "`{name}` transaction {} reverted",
            receipt.transaction_hash
        );
        Ok(receipt)
    }
}

#[async_trait]
impl NftContract for ChainNft {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    fn default_owner(&self) -> Result<Address> {
        self.signer()
    }

    async fn mint_token(&self, owner: Address, metadata_uri: &str) -> Result<U256> {
        let args = [DynSolValue::Address(owner), DynSolValue::String(metadata_uri.to_string())];
        let receipt = self.send("mintToken", &args).await?;
        minted_token_id(receipt.inner.logs(), self.address()).ok_or_else(|| {
            eyre!("no Transfer event in mint transaction {}", receipt.transaction_hash)
        })
    }

    async fn token_uri(&self, token_id: U256) -> Result<String> {
        let value = self.call("tokenURI", &[DynSolValue::Uint(token_id, 256)]).await?;
        value.as_str().map(str::to_string).ok_or_eyre("`tokenURI` did not return a string")
    }

    async fn owner_of(&self, token_id: U256) -> Result<Address> {
        let value = self.call("ownerOf", &[DynSolValue::Uint(token_id, 256)]).await?;
        value.as_address().ok_or_eyre("`ownerOf` did not return an address")
    }

    async fn transfer(&self, token_id: U256, to: Address) -> Result<B256> {
        let owner = self.owner_of(token_id).await?;
        let args = [
            DynSolValue::Address(owner),
            DynSolValue::Address(to),
            DynSolValue::Uint(token_id, 256),
        ];
        let receipt = self.send("transferFrom", &args).await?;
        Ok(receipt.transaction_hash)
    }

    async fn creation_info(&self, token_id: U256) -> Result<CreationInfo> {
        let filter = mint_filter(self.address(), token_id);
        let logs = self.contract.provider().get_logs(&filter).await?;
        let log = logs.first().ok_or_else(|| eyre!("no mint event found for token {token_id}"))?;

        let transfer = log.log_decode::<Transfer>()?;
        let block_number =
            log.block_number.ok_or_eyre("mint event is missing its block number")?;
        Ok(CreationInfo { creator_address: transfer.inner.data.to, block_number })
    }
}

/// Matches the `Transfer(0x0, *, token_id)` event emitted by `contract` when minting.
fn mint_filter(contract: Address, token_id: U256) -> Filter {
    Filter::new()
        .address(contract)
        .event_signature(Transfer::SIGNATURE_HASH)
        .topic1(B256::ZERO)
        .topic3(B256::from(token_id.to_be_bytes::<32>()))
        .from_block(BlockNumberOrTag::Earliest)
}

/// Reads the id of the token minted by `contract` from a transaction's receipt logs.
fn minted_token_id(logs: &[Log], contract: Address) -> Option<U256> {
    logs.iter()
        .filter(|log| log.address() == contract)
        .filter_map(|log| log.log_decode::<Transfer>().ok())
        .find(|log| log.inner.data.from == Address::ZERO)
        .map(|log| log.inner.data.tokenId)
}
