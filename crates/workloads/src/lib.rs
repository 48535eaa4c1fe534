//! Workload definitions for stampede campaigns.
//!
//! `AmmCatalog` builds the concrete call for each canonical stage against
//! a V2-style pair router, `KeyringSigner` derives and holds actor signing keys,
//! and `abi` provides the underlying call input encoding.

pub mod abi;

mod catalog;
mod keyring;

pub use catalog::{AmmCatalog, AmmParams};
pub use keyring::KeyringSigner;
