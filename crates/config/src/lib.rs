//! # minty-config
//!
//! Minty configuration.
//!
//! Settings are resolved from, in increasing priority:
//!
//! 1. the built-in defaults,
//! 2. `minty.toml` (or the file named by `MINTY_CONFIG`),
//! 3. `ETH_RPC_URL` / `ETH_PRIVATE_KEY`,
//! 4. `MINTY_`-prefixed environment variables, e.g. `MINTY_IPFS_API_KEY`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

mod error;
pub use error::{ConfigIssue, ExtractConfigError};

pub use figment;

/// Minty configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of the chain the NFT contract lives on.
    pub eth_rpc_url: String,
    /// Hex encoded private key used to sign deployments, mints and transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Base URL of the IPFS HTTP API, without the `/api/v0` suffix.
    pub ipfs_api_url: String,
    /// Project id / key for the IPFS API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_api_key: Option<String>,
    /// Project secret for the IPFS API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_api_secret: Option<String>,
    /// Public gateway host used to build `https://<host>/ipfs/<cid>` links.
    pub ipfs_gateway_url: String,
    /// Where the deployment record is read from (and written to by `deploy`).
    pub deployment_file: PathBuf,
}

impl Config {
    /// File name of config toml file
    pub const FILE_NAME: &'static str = "minty.toml";

    /// Environment variable prefix for overrides.
    pub const ENV_PREFIX: &'static str = "MINTY_";

    /// Default local RPC endpoint.
    pub const DEFAULT_RPC_URL: &'static str = "http://localhost:8545";

    /// Default IPFS API endpoint.
    pub const DEFAULT_IPFS_API_URL: &'static str = "https://ipfs.infura.io:5001";

    /// Default public gateway.
    pub const DEFAULT_IPFS_GATEWAY_URL: &'static str = "https://ipfs.io";

    /// Default location of the deployment record.
    pub const DEFAULT_DEPLOYMENT_FILE: &'static str = "contracts/minty-deployment.json";

    /// Returns the current `Config`.
    ///
    /// See [`figment`](Self::figment) for more details.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Returns the `Config` read from `file` instead of the default `minty.toml`.
    pub fn load_with_file(file: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_file(file))
    }

    /// Attempts to extract a `Config` from `provider`, returning the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use minty_config::{Config, figment::providers::Serialized};
    ///
    /// let figment = Config::figment().merge(Serialized::default("eth_rpc_url", "http://node:8545"));
    /// let config = Config::try_from(figment).unwrap();
    /// assert_eq!(config.eth_rpc_url, "http://node:8545");
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        Figment::from(provider).extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Returns the default figment.
    ///
    /// The toml file is `minty.toml` unless `MINTY_CONFIG` names another one.
    pub fn figment() -> Figment {
        let file = std::env::var_os("MINTY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME));
        Self::figment_with_file(file)
    }

    /// Returns the figment reading `file` as the toml source.
    pub fn figment_with_file(file: impl AsRef<Path>) -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(file.as_ref()))
            .merge(Env::raw().only(&["ETH_RPC_URL"]).map(|_| "eth_rpc_url".into()))
            .merge(Env::raw().only(&["ETH_PRIVATE_KEY"]).map(|_| "private_key".into()))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG", "DEBUG"]))
    }

    /// Returns the private key, if a non-empty one is configured.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    /// Returns the IPFS API key and secret, if a key is configured.
    pub fn ipfs_credentials(&self) -> Option<(&str, Option<&str>)> {
        let key = self.ipfs_api_key.as_deref().filter(|key| !key.trim().is_empty())?;
        Some((key, self.ipfs_api_secret.as_deref()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eth_rpc_url: Self::DEFAULT_RPC_URL.to_string(),
            private_key: None,
            ipfs_api_url: Self::DEFAULT_IPFS_API_URL.to_string(),
            ipfs_api_key: None,
            ipfs_api_secret: None,
            ipfs_gateway_url: Self::DEFAULT_IPFS_GATEWAY_URL.to_string(),
            deployment_file: PathBuf::from(Self::DEFAULT_DEPLOYMENT_FILE),
        }
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("eth_rpc_url", &self.eth_rpc_url)
            .field("private_key", &redact(&self.private_key))
            .field("ipfs_api_url", &self.ipfs_api_url)
            .field("ipfs_api_key", &self.ipfs_api_key)
            .field("ipfs_api_secret", &redact(&self.ipfs_api_secret))
            .field("ipfs_gateway_url", &self.ipfs_gateway_url)
            .field("deployment_file", &self.deployment_file)
            .finish()
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Minty Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn figment_is_default() {
        figment::Jail::expect_with(|_| {
            let config = Config::load().unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn reads_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "minty.toml",
                r#"
                eth_rpc_url = "https://sepolia.example/v3/abc"
                ipfs_api_key = "project"
                ipfs_api_secret = "secret"
                deployment_file = "out/deployment.json"
            "#,
            )?;
            let config = Config::load().unwrap();
            assert_eq!(config.eth_rpc_url, "https://sepolia.example/v3/abc");
            assert_eq!(config.ipfs_credentials(), Some(("project", Some("secret"))));
            assert_eq!(config.deployment_file, PathBuf::from("out/deployment.json"));
            assert_eq!(config.ipfs_gateway_url, Config::DEFAULT_IPFS_GATEWAY_URL);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("minty.toml", r#"eth_rpc_url = "http://from-toml:8545""#)?;
            jail.set_env("ETH_RPC_URL", "http://from-eth-env:8545");
            let config = Config::load().unwrap();
            assert_eq!(config.eth_rpc_url, "http://from-eth-env:8545");

            jail.set_env("MINTY_ETH_RPC_URL", "http://from-minty-env:8545");
            jail.set_env("MINTY_PRIVATE_KEY", "0xabc");
            let config = Config::load().unwrap();
            assert_eq!(config.eth_rpc_url, "http://from-minty-env:8545");
            assert_eq!(config.private_key(), Some("0xabc"));
            Ok(())
        });
    }

    #[test]
    fn custom_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("other.toml", r#"ipfs_gateway_url = "https://gateway.test""#)?;
            jail.set_env("MINTY_CONFIG", "other.toml");
            let config = Config::load().unwrap();
            assert_eq!(config.ipfs_gateway_url, "https://gateway.test");

            let config = Config::load_with_file("missing.toml").unwrap();
            assert_eq!(config.ipfs_gateway_url, Config::DEFAULT_IPFS_GATEWAY_URL);
            Ok(())
        });
    }

    #[test]
    fn invalid_toml_is_reported() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("minty.toml", "eth_rpc_url = [1, 2]")?;
            let err = Config::load().unwrap_err();
            let msg = err.to_string();
            assert!(msg.starts_with(error::FAILED_TO_EXTRACT_CONFIG_MSG), "{msg}");
            assert!(msg.contains("eth_rpc_url"), "{msg}");
            Ok(())
        });
    }

    #[test]
    fn empty_secrets_are_ignored() {
        let config = Config {
            private_key: Some("  ".to_string()),
            ipfs_api_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.private_key(), None);
        assert_eq!(config.ipfs_credentials(), None);
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = Config {
            private_key: Some("0xdeadbeef".to_string()),
            ipfs_api_secret: Some("hunter2".to_string()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("deadbeef"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
