//! IPFS content store client and `ipfs://` URI helpers.

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    multipart::{Form, Part},
};
use serde::Deserialize;
use std::fmt;
use url::Url;

pub use reqwest::StatusCode;

/// Scheme prefix of content URIs.
pub const IPFS_URI_PREFIX: &str = "ipfs://";

/// Errors returned by a [`ContentStore`].
#[derive(Debug, thiserror::Error)]
pub enum IpfsError {
    #[error("failed to add content to IPFS ({status}): {body}")]
    Upload { status: StatusCode, body: String },
    #[error("failed to fetch content from IPFS ({status}): {body}")]
    Fetch { status: StatusCode, body: String },
    #[error("invalid IPFS API url {url:?}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
    #[error("IPFS API returned an empty response")]
    EmptyResponse,
    #[error("failed to decode IPFS API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A content-addressed store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Uploads `content` under the file name `path`, e.g. `/nft/cat.png`.
    ///
    /// Returns the content id of the directory holding the file, so that
    /// `<cid>/<file name>` addresses the upload.
    async fn add(&self, path: &str, content: Vec<u8>) -> Result<String, IpfsError>;

    /// Fetches the bytes addressed by `path`, a `<cid>[/<path>]` string.
    async fn cat(&self, path: &str) -> Result<Vec<u8>, IpfsError>;
}

/// A [`ContentStore`] backed by an IPFS HTTP API endpoint, e.g. Infura's.
#[derive(Clone)]
pub struct IpfsClient {
    client: Client,
    api_url: Url,
    credentials: Option<(String, Option<String>)>,
}

impl fmt::Debug for IpfsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpfsClient")
            .field("api_url", &self.api_url.as_str())
            .field("key", &self.credentials.as_ref().map(|(key, _)| key))
            .finish_non_exhaustive()
    }
}

impl IpfsClient {
    /// Creates a client for the API rooted at `api_url`.
    pub fn new(api_url: &str) -> Result<Self, IpfsError> {
        let url = api_url.trim_end_matches('/');
        let api_url = Url::parse(&format!("{url}/api/v0/"))
            .map_err(|source| IpfsError::InvalidUrl { url: api_url.to_string(), source })?;
        Ok(Self { client: Client::new(), api_url, credentials: None })
    }

    /// Authenticates every request with HTTP basic auth.
    pub fn with_credentials(mut self, key: impl Into<String>, secret: Option<String>) -> Self {
        self.credentials = Some((key.into(), secret));
        self
    }

    /// Returns the full URL of an API method, e.g. `add`.
    pub fn endpoint(&self, method: &str) -> Result<Url, IpfsError> {
        self.api_url
            .join(method)
            .map_err(|source| IpfsError::InvalidUrl { url: method.to_string(), source })
    }

    fn post(&self, method: &str) -> Result<RequestBuilder, IpfsError> {
        let request = self.client.post(self.endpoint(method)?);
        Ok(match &self.credentials {
            Some((key, secret)) => request.basic_auth(key, secret.as_ref()),
            None => request,
        })
    }
}

#[async_trait]
impl ContentStore for IpfsClient {
    async fn add(&self, path: &str, content: Vec<u8>) -> Result<String, IpfsError> {
        debug!(path, len = content.len(), "adding content to IPFS");
        let form = Form::new().part("file", Part::bytes(content).file_name(path.to_string()));
        let res = self
            .post("add")?
            .query(&[("pin", "true"), ("wrap-with-directory", "true")])
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(IpfsError::Upload { status, body });
        }
        let cid = parse_add_response(&body, path)?;
        trace!(path, %cid, "added content to IPFS");
        Ok(cid)
    }

    async fn cat(&self, path: &str) -> Result<Vec<u8>, IpfsError> {
        debug!(path, "fetching content from IPFS");
        let res = self.post("cat")?.query(&[("arg", path)]).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(IpfsError::Fetch { status, body });
        }
        Ok(res.bytes().await?.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct AddEntry {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Hash", alias = "cid")]
    hash: String,
}

/// Parses the newline delimited JSON returned by `/api/v0/add` for an upload of `path` and
/// returns the content id of the directory the file was added to.
///
/// With `wrap-with-directory` the API reports the file, every parent directory of `path`, and
/// the wrapping directory under an empty name. When the parent directory is not listed, the
/// file's directory is addressed through the wrapper instead.
fn parse_add_response(body: &str, path: &str) -> Result<String, IpfsError> {
    let entries = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str::<AddEntry>)
        .collect::<Result<Vec<_>, _>>()?;

    let dir = path.trim_start_matches('/').rsplit_once('/').map_or("", |(dir, _)| dir);
    if let Some(entry) = entries.iter().find(|entry| entry.name == dir) {
        return Ok(entry.hash.clone());
    }
    if let Some(wrapper) = entries.iter().find(|entry| entry.name.is_empty()) {
        return Ok(format!("{}/{dir}", wrapper.hash));
    }
    entries.last().map(|entry| entry.hash.clone()).ok_or(IpfsError::EmptyResponse)
}

/// Returns `uri` with an `ipfs://` prefix.
///
/// `/ipfs/<cid>` paths are rewritten, bare content ids are prefixed.
pub fn ensure_ipfs_uri_prefix(uri: &str) -> String {
    if uri.starts_with(IPFS_URI_PREFIX) {
        uri.to_string()
    } else if let Some(rest) = uri.strip_prefix("/ipfs/") {
        format!("{IPFS_URI_PREFIX}{rest}")
    } else {
        format!("{IPFS_URI_PREFIX}{uri}")
    }
}

/// Removes a leading `ipfs://`, if present.
pub fn strip_ipfs_uri_prefix(uri: &str) -> &str {
    uri.strip_prefix(IPFS_URI_PREFIX).unwrap_or(uri)
}

/// Returns the content id of an `ipfs://<cid>/<path>` URI.
pub fn extract_cid(uri: &str) -> &str {
    strip_ipfs_uri_prefix(uri).split('/').next().unwrap_or_default()
}

/// Returns the public gateway URL for `uri`: `<gateway>/ipfs/<cid>/<path>`.
pub fn make_gateway_url(gateway: &str, uri: &str) -> String {
    format!("{}/ipfs/{}", gateway.trim_end_matches('/'), strip_ipfs_uri_prefix(uri))
}
