//! Common utilities for building and using minty's tools.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod errors;
pub mod fmt;
pub mod ipfs;
pub mod provider;

pub use ipfs::{ContentStore, IpfsClient, IpfsError};
pub use provider::*;
