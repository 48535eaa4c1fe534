//! Resource manifest loading.
//!
//! The manifest is JSON produced by the contract deployment tooling: a
//! router address plus token addresses in (base, quote) pair order, two
//! per actor slot.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stampede_engine::ResourceRegistry;
use stampede_types::Address;

use crate::error::CliError;

/// On-disk manifest of deployed contract addresses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceManifest {
    /// Pair router address, `0x`-prefixed hex.
    pub router: String,
    /// Token addresses in pair order: `[base0, quote0, base1, quote1, ..]`.
    pub tokens: Vec<String>,
}

/// Load a manifest and build the registry from it.
pub fn load_resources(path: &Path) -> Result<ResourceRegistry, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: ResourceManifest =
        serde_json::from_str(&raw).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    registry_from_manifest(path, &manifest)
}

fn registry_from_manifest(
    path: &Path,
    manifest: &ResourceManifest,
) -> Result<ResourceRegistry, CliError> {
    if manifest.tokens.len() % 2 != 0 {
        return Err(CliError::OddResourceCount {
            path: path.to_path_buf(),
            count: manifest.tokens.len(),
        });
    }

    let parse = |value: &str| {
        Address::from_hex(value).map_err(|source| CliError::InvalidAddress {
            path: path.to_path_buf(),
            value: value.to_string(),
            source,
        })
    };

    let router = parse(&manifest.router)?;
    let tokens = manifest
        .tokens
        .iter()
        .map(|value| parse(value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResourceRegistry::new(tokens, router))
}
