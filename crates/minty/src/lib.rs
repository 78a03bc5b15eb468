//! # minty
//!
//! Mint, inspect, transfer and pin NFTs whose assets and metadata live on IPFS.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

// Used by the `minty` binary.
use clap as _;
use clap_complete as _;
use minty_cli as _;
use yansi as _;

#[macro_use]
extern crate tracing;

pub mod contract;
pub mod deploy;
pub mod deployment;
pub mod minty;
pub mod session;
pub mod types;

pub use contract::{ChainNft, NftContract};
pub use deploy::{ContractArtifact, DeployParams, deploy_contract};
pub use deployment::{DeploymentRecord, DeploymentRecordError};
pub use minty::Minty;
pub use session::Session;
pub use types::*;
