use clap::{Parser, ValueHint};
use eyre::Result;
use minty::{
    DeployParams, deploy_contract,
    deploy::{DEFAULT_ARTIFACT_PATH, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_SYMBOL},
};
use minty_common::fmt::align_rows;
use minty_config::Config;
use std::path::PathBuf;
use yansi::Paint;

/// CLI arguments for `minty deploy`.
#[derive(Clone, Debug, Parser)]
pub struct DeployArgs {
    /// JSON artifact containing the contract's `abi` and `bytecode`.
    #[arg(long, short, default_value = DEFAULT_ARTIFACT_PATH, value_hint = ValueHint::FilePath)]
    pub contract: PathBuf,

    /// Where to write the deployment record. Defaults to the configured `deployment_file`.
    #[arg(long, short, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// The name of the token contract.
    #[arg(long, short, default_value = DEFAULT_TOKEN_NAME)]
    pub name: String,

    /// A short symbol for the tokens in this contract.
    #[arg(long, short, default_value = DEFAULT_TOKEN_SYMBOL)]
    pub symbol: String,
}

impl DeployArgs {
    pub async fn run(self, config: &Config) -> Result<()> {
        let Self { contract, output, name, symbol } = self;
        let params = DeployParams {
            artifact: contract,
            output: output.unwrap_or_else(|| config.deployment_file.clone()),
            token_name: name,
            token_symbol: symbol,
        };

        let Some(record) = deploy_contract(config, &params).await? else {
            println!("{}", "Unable to connect to provider".red());
            return Ok(());
        };

        println!("{}", "🌿 Deployed a new NFT contract:".green());
        println!(
            "{}",
            align_rows(&[
                ("Contract Address:", record.contract_address.to_string()),
                ("Token Name:", record.token_name.clone()),
                ("Token Symbol:", record.token_symbol.clone()),
            ])
        );
        println!("transaction receipt saved as {}", params.output.display());
        Ok(())
    }
}
