use crate::{
    contract::{ChainNft, NftContract},
    minty::Minty,
};
use eyre::Result;
use minty_common::{ContentStore, IpfsClient};
use minty_config::Config;
use std::future::Future;
use tokio::sync::OnceCell;

/// Holds the configuration of one invocation and builds its [`Minty`] at most once.
pub struct Session<C = ChainNft, S = IpfsClient> {
    config: Config,
    minty: OnceCell<Minty<C, S>>,
}

impl<C, S> Session<C, S> {
    pub fn new(config: Config) -> Self {
        Self { config, minty: OnceCell::new() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Session {
    /// Returns the session's [`Minty`], connecting on first use.
    pub async fn minty(&self) -> Result<&Minty> {
        self.minty_with(Minty::connect).await
    }
}

impl<C: NftContract, S: ContentStore> Session<C, S> {
    /// Returns the session's [`Minty`], building it with `connect` on first use.
    ///
    /// Once a call has succeeded, later calls return the same instance without invoking
    /// `connect`. A failed attempt leaves the session empty.
    pub async fn minty_with<'a, F, Fut>(&'a self, connect: F) -> Result<&'a Minty<C, S>>
    where
        F: FnOnce(&'a Config) -> Fut,
        Fut: Future<Output = Result<Minty<C, S>>>,
    {
        self.minty
            .get_or_try_init(|| {
                trace!("initializing minty session");
                connect(&self.config)
            })
            .await
    }
}
