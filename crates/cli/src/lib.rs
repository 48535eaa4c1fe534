//! Campaign setup plumbing for the `stampede` binary: campaign file
//! parsing, key derivation and export, genesis allocation output, and
//! resource manifest loading.

mod config;
mod error;
mod genesis;
mod keys;
mod resources;

pub use config::{parse_policy, parse_workflow, AmountsSection, CampaignFile, CampaignSection};
pub use error::CliError;
pub use genesis::generate_genesis_toml;
pub use keys::{KeyFile, KeyFileEntry};
pub use resources::{load_resources, ResourceManifest};
