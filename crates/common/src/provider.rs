//! Commonly used helpers to construct `Provider`s

use alloy_network::EthereumWallet;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use eyre::{Result, WrapErr};
use url::Url;

/// Parses an RPC URL, accepting `localhost:<port>` shorthands.
pub fn parse_rpc_url(url: &str) -> Result<Url> {
    let url = url.trim();
    // invalid url: non-prefixed URL scheme is not allowed, so we prepend the default http prefix
    let url = if url.starts_with("localhost:") { format!("http://{url}") } else { url.to_string() };
    Url::parse(&url).wrap_err_with(|| format!("invalid provider URL: {url:?}"))
}

/// Parses a hex encoded private key.
pub fn parse_private_key(key: &str) -> Result<PrivateKeySigner> {
    key.trim().parse::<PrivateKeySigner>().wrap_err("invalid private key")
}

/// Constructs a read-only HTTP provider.
pub fn get_http_provider(url: &str) -> Result<DynProvider> {
    let url = parse_rpc_url(url)?;
    trace!(%url, "connecting http provider");
    Ok(ProviderBuilder::new().connect_http(url).erased())
}

/// Constructs an HTTP provider that signs transactions locally with `signer`.
pub fn get_signing_provider(url: &str, signer: PrivateKeySigner) -> Result<DynProvider> {
    let url = parse_rpc_url(url)?;
    trace!(%url, signer = %signer.address(), "connecting signing provider");
    Ok(ProviderBuilder::new().wallet(EthereumWallet::new(signer)).connect_http(url).erased())
}
