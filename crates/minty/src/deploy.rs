//! Deploys the NFT contract and records where it lives.

use crate::deployment::DeploymentRecord;
use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_network::{EthereumWallet, TransactionBuilder, eip2718::Encodable2718};
use alloy_primitives::Bytes;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use eyre::{OptionExt, Result, WrapErr};
use minty_common::{get_http_provider, parse_private_key};
use minty_config::Config;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Token name used when deploying without one.
pub const DEFAULT_TOKEN_NAME: &str = "Julep";

/// Token symbol used when deploying without one.
pub const DEFAULT_TOKEN_SYMBOL: &str = "JLP";

/// Default location of the compiled contract.
pub const DEFAULT_ARTIFACT_PATH: &str = "contracts/Minty.json";

/// A compiled contract: its ABI and creation bytecode.
///
/// Accepts both a plain `{ "abi", "bytecode": "0x.." }` document and the
/// `{ "bytecode": { "object": "0x.." } }` layout emitted by solc and forge.
#[derive(Clone, Debug, Deserialize)]
pub struct ContractArtifact {
    pub abi: JsonAbi,
    #[serde(deserialize_with = "deserialize_bytecode")]
    pub bytecode: Bytes,
}

fn deserialize_bytecode<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bytecode {
        Hex(Bytes),
        Object { object: Bytes },
    }

    Ok(match Bytecode::deserialize(deserializer)? {
        Bytecode::Hex(code) | Bytecode::Object { object: code } => code,
    })
}

impl ContractArtifact {
    /// Reads the artifact at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .wrap_err_with(|| format!("failed to read contract artifact {}", path.display()))?;
        serde_json::from_slice(&data)
            .wrap_err_with(|| format!("invalid contract artifact {}", path.display()))
    }

    /// Returns the bytecode followed by the ABI encoded `(name, symbol)` constructor arguments.
    pub fn creation_code(&self, token_name: &str, token_symbol: &str) -> Result<Bytes> {
        eyre::ensure!(!self.bytecode.is_empty(), "contract artifact has no bytecode");
        let constructor =
            self.abi.constructor.as_ref().ok_or_eyre("contract ABI has no constructor")?;
        let args = constructor.abi_encode_input(&[
            DynSolValue::String(token_name.to_string()),
            DynSolValue::String(token_symbol.to_string()),
        ])?;

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&args);
        Ok(code.into())
    }
}

/// Inputs of `minty deploy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployParams {
    pub artifact: PathBuf,
    pub output: PathBuf,
    pub token_name: String,
    pub token_symbol: String,
}

/// Deploys the contract in `params.artifact` and writes its record to `params.output`.
///
/// Returns `Ok(None)` without deploying when the RPC endpoint cannot be reached. Every call
/// deploys a new instance and overwrites the output file.
pub async fn deploy_contract(
    config: &Config,
    params: &DeployParams,
) -> Result<Option<DeploymentRecord>> {
    let artifact = ContractArtifact::load(&params.artifact).await?;
    let code = artifact.creation_code(&params.token_name, &params.token_symbol)?;

    let provider = get_http_provider(&config.eth_rpc_url)?;
    let chain_id = match provider.get_chain_id().await {
        Ok(chain_id) => chain_id,
        Err(err) => {
            warn!(url = %config.eth_rpc_url, %err, "unable to connect to provider");
            return Ok(None);
        }
    };
    debug!(chain_id, "connected to provider");

    let key = config
        .private_key()
        .ok_or_eyre("deploying requires a private key; set `private_key` or ETH_PRIVATE_KEY")?;
    let signer = parse_private_key(key)?;
    let from = signer.address();

    let nonce = provider.get_transaction_count(from).await?;
    let mut tx = TransactionRequest::default()
        .with_from(from)
        .with_nonce(nonce)
        .with_chain_id(chain_id)
        .with_deploy_code(code);

    let gas =
        provider.estimate_gas(tx.clone()).await.wrap_err("failed to estimate deployment gas")?;
    let fees =
        provider.estimate_eip1559_fees().await.wrap_err("failed to estimate EIP-1559 fees")?;
    tx.set_gas_limit(gas);
    tx.set_max_fee_per_gas(fees.max_fee_per_gas);
    tx.set_max_priority_fee_per_gas(fees.max_priority_fee_per_gas);

    let signed = tx.build(&EthereumWallet::new(signer)).await?;
    debug!(%from, nonce, gas, "sending deployment transaction");
    let receipt = provider
        .send_raw_transaction(signed.encoded_2718().as_ref())
        .await?
        .get_receipt()
        .await
        .wrap_err("failed to get deployment receipt")?;

    eyre::ensure!(receipt.status(), "deployment transaction {} reverted", receipt.transaction_hash);
    let contract_address = receipt
        .contract_address
        .ok_or_eyre("deployment receipt does not contain a contract address")?;
    info!(%contract_address, tx = %receipt.transaction_hash, "contract deployed");

    let Value::Object(tx_receipt) = serde_json::to_value(&receipt)? else {
        eyre::bail!("deployment receipt did not serialize to a JSON object");
    };
    let record = DeploymentRecord {
        contract_address,
        token_name: params.token_name.clone(),
        token_symbol: params.token_symbol.clone(),
        abi: artifact.abi,
        tx_receipt,
    };
    record.save(&params.output).await?;
    Ok(Some(record))
}
