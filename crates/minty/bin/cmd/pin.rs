use alloy_primitives::U256;
use clap::Parser;
use eyre::Result;
use minty::Session;
use minty_common::fmt::align_rows;
use yansi::Paint;

/// CLI arguments for `minty pin`.
#[derive(Clone, Debug, Parser)]
pub struct PinArgs {
    /// The id of the token.
    pub token_id: U256,
}

impl PinArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let minty = session.minty().await?;
        let pinned = minty.pin(self.token_id).await?;

        println!("{}", format!("🌿 Pinned all data for token id {}", self.token_id).green());
        println!(
            "{}",
            align_rows(&[
                ("Metadata Address:", &pinned.metadata_uri),
                ("Asset Address:", &pinned.asset_uri),
            ])
        );
        Ok(())
    }
}
