use crate::cmd::{
    deploy::DeployArgs, mint::MintArgs, pin::PinArgs, show::ShowArgs, transfer::TransferArgs,
};
use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Mint and manage NFTs backed by IPFS.
#[derive(Parser)]
#[command(name = "minty", version, next_display_order = None)]
pub struct Minty {
    /// Path to the config file. Defaults to `minty.toml`.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, env = "MINTY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: MintySubcommand,
}

#[derive(Subcommand)]
pub enum MintySubcommand {
    /// Create a new NFT from an asset file.
    #[command(visible_alias = "m")]
    Mint(MintArgs),

    /// Show the owner, metadata and asset of an NFT.
    #[command(visible_alias = "s")]
    Show(ShowArgs),

    /// Transfer an NFT to a new owner.
    #[command(visible_alias = "t")]
    Transfer(TransferArgs),

    /// Pin the asset and metadata of an NFT to IPFS.
    #[command(visible_alias = "p")]
    Pin(PinArgs),

    /// Deploy a new NFT contract and write its deployment record.
    #[command(visible_alias = "d")]
    Deploy(DeployArgs),

    /// Generate shell completions script.
    #[command(visible_alias = "com")]
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address};
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Minty::command().debug_assert();
    }

    #[test]
    fn parse_mint_defaults() {
        let args = Minty::parse_from(["minty", "mint", "assets/cat.png"]);
        match args.cmd {
            MintySubcommand::Mint(mint) => {
                assert_eq!(mint.asset_path, PathBuf::from("assets/cat.png"));
                assert_eq!(mint.name, "Test Mint");
                assert_eq!(mint.description, "A basic test of mint");
                assert_eq!(mint.owner, None);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_mint() {
        let args = Minty::parse_from([
            "minty",
            "mint",
            "cat.png",
            "-n",
            "Cat",
            "--description",
            "A cat",
            "-o",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        ]);
        match args.cmd {
            MintySubcommand::Mint(mint) => {
                assert_eq!(mint.name, "Cat");
                assert_eq!(mint.description, "A cat");
                assert_eq!(
                    mint.owner,
                    Some(address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"))
                );
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_show() {
        let args = Minty::parse_from(["minty", "show", "7", "-c", "--fetch-asset"]);
        match args.cmd {
            MintySubcommand::Show(show) => {
                assert_eq!(show.token_id, U256::from(7));
                assert!(show.creation_info);
                assert!(show.fetch_asset);
            }
            _ => unreachable!(),
        }

        let args = Minty::parse_from(["minty", "show", "0x10"]);
        match args.cmd {
            MintySubcommand::Show(show) => {
                assert_eq!(show.token_id, U256::from(16));
                assert!(!show.creation_info);
                assert!(!show.fetch_asset);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_transfer() {
        let args = Minty::parse_from([
            "minty",
            "transfer",
            "1",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        ]);
        match args.cmd {
            MintySubcommand::Transfer(transfer) => {
                assert_eq!(transfer.token_id, U256::from(1));
                assert_eq!(transfer.to, address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
            }
            _ => unreachable!(),
        }

        assert!(Minty::try_parse_from(["minty", "transfer", "1", "bob"]).is_err());
    }

    #[test]
    fn parse_pin() {
        let args = Minty::parse_from(["minty", "pin", "3"]);
        match args.cmd {
            MintySubcommand::Pin(pin) => assert_eq!(pin.token_id, U256::from(3)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_deploy() {
        let args = Minty::parse_from(["minty", "deploy"]);
        match args.cmd {
            MintySubcommand::Deploy(deploy) => {
                assert_eq!(deploy.contract, PathBuf::from("contracts/Minty.json"));
                assert_eq!(deploy.output, None);
                assert_eq!(deploy.name, "Julep");
                assert_eq!(deploy.symbol, "JLP");
            }
            _ => unreachable!(),
        }

        let args = Minty::parse_from([
            "minty",
            "--config",
            "sepolia.toml",
            "deploy",
            "-c",
            "out/Minty.sol/Minty.json",
            "-o",
            "deployments/sepolia.json",
            "-n",
            "Kitties",
            "-s",
            "KIT",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("sepolia.toml")));
        match args.cmd {
            MintySubcommand::Deploy(deploy) => {
                assert_eq!(deploy.contract, PathBuf::from("out/Minty.sol/Minty.json"));
                assert_eq!(deploy.output, Some(PathBuf::from("deployments/sepolia.json")));
                assert_eq!(deploy.name, "Kitties");
                assert_eq!(deploy.symbol, "KIT");
            }
            _ => unreachable!(),
        }
    }
}
