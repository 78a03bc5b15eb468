//! The deployment record: where the NFT contract lives and how to talk to it.

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    collections::BTreeSet,
    io,
    path::{Path, PathBuf},
};

/// Keys a deployment record must contain, and the only ones it may contain.
pub const REQUIRED_KEYS: [&str; 5] =
    ["contract_address", "token_name", "token_symbol", "abi", "tx_receipt"];

/// Errors returned when reading or writing a [`DeploymentRecord`].
#[derive(Debug, thiserror::Error)]
pub enum DeploymentRecordError {
    #[error("deployment record {} not found; run `minty deploy` first", .0.display())]
    NotFound(PathBuf),
    #[error("invalid deployment record: {}", describe_keys(missing, extra))]
    Validation { missing: Vec<String>, extra: Vec<String> },
    #[error("invalid deployment record: expected a JSON object")]
    NotAnObject,
    #[error("failed to access deployment record {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse deployment record: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_keys(missing: &[String], extra: &[String]) -> String {
    let mut parts = Vec::with_capacity(2);
    if !missing.is_empty() {
        parts.push(format!("Missing keys: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        parts.push(format!("Extra keys: {}", extra.join(", ")));
    }
    parts.join("; ")
}

/// A deployed NFT contract instance.
///
/// Written once by `minty deploy` and read by every other command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentRecord {
    pub contract_address: Address,
    pub token_name: String,
    pub token_symbol: String,
    pub abi: JsonAbi,
    /// The deployment transaction's receipt, as returned by the node.
    pub tx_receipt: Map<String, Value>,
}

impl DeploymentRecord {
    /// Loads and validates the record at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DeploymentRecordError> {
        let path = path.as_ref();
        let io_err = |source| DeploymentRecordError::Io { path: path.to_path_buf(), source };

        if !tokio::fs::try_exists(path).await.map_err(io_err)? {
            return Err(DeploymentRecordError::NotFound(path.to_path_buf()));
        }
        let data = tokio::fs::read(path).await.map_err(io_err)?;
        trace!(path = %path.display(), "loaded deployment record");
        Self::from_slice(&data)
    }

    /// Parses and validates a record from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, DeploymentRecordError> {
        let value: Value = serde_json::from_slice(data)?;
        let Value::Object(object) = value else {
            return Err(DeploymentRecordError::NotAnObject);
        };
        validate_keys(&object)?;
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    /// Writes the record to `path` as pretty-printed JSON, replacing any existing file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), DeploymentRecordError> {
        let path = path.as_ref();
        let io_err = |source| DeploymentRecordError::Io { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        tokio::fs::write(path, json).await.map_err(io_err)?;
        debug!(path = %path.display(), address = %self.contract_address, "saved deployment record");
        Ok(())
    }
}

fn validate_keys(object: &Map<String, Value>) -> Result<(), DeploymentRecordError> {
    let required = REQUIRED_KEYS.into_iter().collect::<BTreeSet<_>>();
    let present = object.keys().map(String::as_str).collect::<BTreeSet<_>>();

    let missing = required.difference(&present).map(|key| key.to_string()).collect::<Vec<_>>();
    let extra = present.difference(&required).map(|key| key.to_string()).collect::<Vec<_>>();
    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(DeploymentRecordError::Validation { missing, extra })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    pub(crate) fn minty_abi() -> Value {
        json!([
            {
                "type": "constructor",
                "inputs": [
                    { "name": "tokenName", "type": "string", "internalType": "string" },
                    { "name": "symbol", "type": "string", "internalType": "string" }
                ],
                "stateMutability": "nonpayable"
            },
            {
                "type": "function",
                "name": "mintToken",
                "inputs": [
                    { "name": "owner", "type": "address", "internalType": "address" },
                    { "name": "metadataURI", "type": "string", "internalType": "string" }
                ],
                "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }],
                "stateMutability": "nonpayable"
            },
            {
                "type": "function",
                "name": "tokenURI",
                "inputs": [{ "name": "tokenId", "type": "uint256", "internalType": "uint256" }],
                "outputs": [{ "name": "", "type": "string", "internalType": "string" }],
                "stateMutability": "view"
            }
        ])
    }

    pub(crate) fn record_json() -> Value {
        json!({
            "contract_address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "token_name": "Julep",
            "token_symbol": "JLP",
            "abi": minty_abi(),
            "tx_receipt": {
                "transactionHash": "0x6b2a0c3f0ab5dbeb2c8f6b2d37bdb4be5ef1a8a1e47c4ef5a2f7c0d3b0a7e4f1",
                "status": "0x1",
                "contractAddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3"
            }
        })
    }

    fn write_record(value: &Value) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minty-deployment.json");
        std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn loads_valid_record() {
        let (_dir, path) = write_record(&record_json());
        let record = DeploymentRecord::load(&path).await.unwrap();
        assert_eq!(record.token_name, "Julep");
        assert_eq!(record.token_symbol, "JLP");
        assert_eq!(
            record.contract_address.to_string(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert!(record.abi.function("mintToken").is_some());
        assert_eq!(record.tx_receipt["status"], "0x1");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = DeploymentRecord::load(&path).await.unwrap_err();
        assert!(matches!(&err, DeploymentRecordError::NotFound(p) if *p == path), "{err:?}");
    }

    #[tokio::test]
    async fn missing_keys_are_named() {
        let mut value = record_json();
        let object = value.as_object_mut().unwrap();
        object.remove("abi");
        object.remove("token_symbol");
        let (_dir, path) = write_record(&value);

        let err = DeploymentRecord::load(&path).await.unwrap_err();
        match &err {
            DeploymentRecordError::Validation { missing, extra } => {
                assert_eq!(missing, &["abi", "token_symbol"]);
                assert!(extra.is_empty());
            }
            err => panic!("unexpected error: {err:?}"),
        }
        assert_eq!(err.to_string(), "invalid deployment record: Missing keys: abi, token_symbol");
    }

    #[tokio::test]
    async fn extra_keys_are_named() {
        let mut value = record_json();
        value["network"] = json!("sepolia");
        let (_dir, path) = write_record(&value);

        let err = DeploymentRecord::load(&path).await.unwrap_err();
        match &err {
            DeploymentRecordError::Validation { missing, extra } => {
                assert!(missing.is_empty());
                assert_eq!(extra, &["network"]);
            }
            err => panic!("unexpected error: {err:?}"),
        }
    }

    #[test]
    fn reports_missing_and_extra_keys_together() {
        let mut value = record_json();
        value.as_object_mut().unwrap().remove("tx_receipt");
        value["chain"] = json!(11155111);
        let err = DeploymentRecord::from_slice(&serde_json::to_vec(&value).unwrap()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid deployment record: Missing keys: tx_receipt; Extra keys: chain"
        );
    }

    #[test]
    fn rejects_non_objects() {
        let err = DeploymentRecord::from_slice(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DeploymentRecordError::NotAnObject), "{err:?}");

        let err = DeploymentRecord::from_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, DeploymentRecordError::Json(_)), "{err:?}");
    }

    #[tokio::test]
    async fn save_then_load() {
        let record = DeploymentRecord::from_slice(&serde_json::to_vec(&record_json()).unwrap())
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/deployment.json");

        record.save(&path).await.unwrap();
        let written: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let mut keys = written.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, ["abi", "contract_address", "token_name", "token_symbol", "tx_receipt"]);

        assert_eq!(DeploymentRecord::load(&path).await.unwrap(), record);
    }
}
