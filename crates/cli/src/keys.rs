//! Actor key derivation and export.
//!
//! Campaigns re-derive keys from the seed at startup, so the exported
//! file is for external tooling: funding scripts and genesis builders
//! need the addresses, debugging needs the secrets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stampede_types::KeyPair;
use stampede_workloads::KeyringSigner;

use crate::error::CliError;

/// One exported key.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeyFileEntry {
    /// Account address, `0x`-prefixed hex.
    pub address: String,
    /// Ed25519 seed, hex. Enough to reconstruct the keypair.
    pub secret_hex: String,
}

/// Exported key material for one campaign seed.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeyFile {
    pub seed: u64,
    pub actors: Vec<KeyFileEntry>,
    #[serde(default)]
    pub funder: Option<KeyFileEntry>,
}

impl KeyFile {
    /// Derive actor keys for `seed` and lay them out for export.
    pub fn derive(seed: u64, actors: usize, with_funder: bool) -> Self {
        let ring = if with_funder {
            KeyringSigner::derive_with_funder(seed, actors)
        } else {
            KeyringSigner::derive(seed, actors)
        };

        Self {
            seed,
            actors: ring.keys().iter().map(entry).collect(),
            funder: ring.funder_key().map(entry),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> String {
        // Serialization of these plain string fields cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Write the file, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<(), CliError> {
        let io_err = |source| CliError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(path, self.to_json()).map_err(io_err)
    }
}

fn entry(key: &KeyPair) -> KeyFileEntry {
    KeyFileEntry {
        address: stampede_types::Address::from_public_key(&key.public_key()).to_hex(),
        secret_hex: hex::encode(key.secret_bytes()),
    }
}
