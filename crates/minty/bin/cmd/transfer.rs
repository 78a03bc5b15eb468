use alloy_primitives::{Address, U256};
use clap::Parser;
use eyre::Result;
use minty::Session;
use yansi::Paint;

/// CLI arguments for `minty transfer`.
#[derive(Clone, Debug, Parser)]
pub struct TransferArgs {
    /// The id of the token.
    pub token_id: U256,

    /// The address of the new owner.
    pub to: Address,
}

impl TransferArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let Self { token_id, to } = self;
        let minty = session.minty().await?;
        let tx_hash = minty.transfer(token_id, to).await?;

        println!("{}", format!("🌿 Transferred token {token_id} to {to}").green());
        println!("Transaction Hash: {tx_hash}");
        Ok(())
    }
}
