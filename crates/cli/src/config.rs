//! Campaign file loading.
//!
//! A campaign file is TOML with an endpoint, a key seed, an optional
//! resource manifest path, the engine parameters, and optional workload
//! amounts:
//!
//! ```toml
//! endpoint = "http://127.0.0.1:3000"
//! seed = 7
//! resources = "keys/resources.json"
//!
//! [campaign]
//! actors = 8
//! chunk_size = 16
//! workflow = "trading"
//! conflict_rate = 0.3
//! conflict_policy = "hot-actor"
//! stage_timeout = "60s"
//! poll_interval = "200ms"
//!
//! [amounts]
//! approve_tokens = 1000000
//! liquidity_tokens = 10000
//! swap_in_tokens = 1
//! airdrop_tokens = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use stampede_engine::{CampaignConfig, ConflictPolicy, Workflow};
use stampede_workloads::{abi, AmmParams};

use crate::error::CliError;

/// Top-level campaign file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignFile {
    /// Node endpoint, overridable from the command line.
    pub endpoint: String,
    /// Seed all actor keys derive from.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Path to the resource manifest. Optional for the fund workflow.
    #[serde(default)]
    pub resources: Option<PathBuf>,
    pub campaign: CampaignSection,
    #[serde(default)]
    pub amounts: AmountsSection,
}

/// Engine parameters, as written in the file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignSection {
    pub actors: usize,
    pub workflow: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub conflict_rate: f64,
    #[serde(default = "default_policy")]
    pub conflict_policy: String,
    #[serde(default = "default_stage_timeout")]
    pub stage_timeout: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

/// Workload amounts in whole tokens, scaled by `10^18` when applied.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmountsSection {
    #[serde(default = "default_approve_tokens")]
    pub approve_tokens: u64,
    #[serde(default = "default_liquidity_tokens")]
    pub liquidity_tokens: u64,
    #[serde(default = "default_swap_in_tokens")]
    pub swap_in_tokens: u64,
    #[serde(default = "default_airdrop_tokens")]
    pub airdrop_tokens: u64,
}

fn default_seed() -> u64 {
    7
}

fn default_chunk_size() -> usize {
    16
}

fn default_policy() -> String {
    "hot-actor".to_string()
}

fn default_stage_timeout() -> String {
    "60s".to_string()
}

fn default_poll_interval() -> String {
    "200ms".to_string()
}

fn default_approve_tokens() -> u64 {
    1_000_000
}

fn default_liquidity_tokens() -> u64 {
    10_000
}

fn default_swap_in_tokens() -> u64 {
    1
}

fn default_airdrop_tokens() -> u64 {
    1
}

impl Default for AmountsSection {
    fn default() -> Self {
        Self {
            approve_tokens: default_approve_tokens(),
            liquidity_tokens: default_liquidity_tokens(),
            swap_in_tokens: default_swap_in_tokens(),
            airdrop_tokens: default_airdrop_tokens(),
        }
    }
}

impl CampaignFile {
    /// Load and parse a campaign file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| CliError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Map the file onto an engine configuration.
    pub fn to_engine_config(&self) -> Result<CampaignConfig, CliError> {
        Ok(CampaignConfig::default()
            .with_actor_count(self.campaign.actors)
            .with_workflow(parse_workflow(&self.campaign.workflow)?)
            .with_chunk_size(self.campaign.chunk_size)
            .with_conflict_rate(self.campaign.conflict_rate)
            .with_conflict_policy(parse_policy(&self.campaign.conflict_policy)?)
            .with_stage_timeout(parse_duration(
                "stage_timeout",
                &self.campaign.stage_timeout,
            )?)
            .with_poll_interval(parse_duration(
                "poll_interval",
                &self.campaign.poll_interval,
            )?))
    }

    /// Map the amounts section onto workload parameters.
    pub fn to_amm_params(&self) -> AmmParams {
        AmmParams {
            approve_amount: abi::parse_units(self.amounts.approve_tokens as u128, 18),
            liquidity_amount: abi::parse_units(self.amounts.liquidity_tokens as u128, 18),
            swap_amount_in: abi::parse_units(self.amounts.swap_in_tokens as u128, 18),
            airdrop_amount: abi::parse_units(self.amounts.airdrop_tokens as u128, 18),
            ..AmmParams::default()
        }
    }
}

/// Parse a workflow name.
pub fn parse_workflow(s: &str) -> Result<Workflow, CliError> {
    match s.to_lowercase().as_str() {
        "liquidity-setup" | "liquidity" => Ok(Workflow::LiquiditySetup),
        "trading" | "swap" => Ok(Workflow::Trading),
        "fund" | "airdrop" => Ok(Workflow::Fund),
        _ => Err(CliError::UnknownWorkflow(s.to_string())),
    }
}

/// Parse a conflict policy name.
pub fn parse_policy(s: &str) -> Result<ConflictPolicy, CliError> {
    match s.to_lowercase().as_str() {
        "hot-actor" | "hotactor" => Ok(ConflictPolicy::HotActor),
        "hot-target" | "hottarget" => Ok(ConflictPolicy::HotTarget),
        _ => Err(CliError::UnknownPolicy(s.to_string())),
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, CliError> {
    humantime::parse_duration(value).map_err(|source| CliError::InvalidDuration {
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file_uses_defaults() {
        let file: CampaignFile = toml::from_str(
            r#"
            endpoint = "http://127.0.0.1:3000"

            [campaign]
            actors = 4
            workflow = "liquidity-setup"
            "#,
        )
        .unwrap();

        assert_eq!(file.seed, 7);
        let config = file.to_engine_config().unwrap();
        assert_eq!(config.actor_count, 4);
        assert_eq!(config.workflow, Workflow::LiquiditySetup);
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.stage_timeout, Duration::from_secs(60));
        assert_eq!(config.poll_interval, Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_file_round_trips() {
        let file: CampaignFile = toml::from_str(
            r#"
            endpoint = "http://127.0.0.1:3000"
            seed = 99
            resources = "keys/resources.json"

            [campaign]
            actors = 10
            workflow = "trading"
            chunk_size = 5
            conflict_rate = 0.3
            conflict_policy = "hot-target"
            stage_timeout = "2m"
            poll_interval = "50ms"

            [amounts]
            swap_in_tokens = 2
            "#,
        )
        .unwrap();

        let config = file.to_engine_config().unwrap();
        assert_eq!(config.workflow, Workflow::Trading);
        assert_eq!(config.conflict_policy, ConflictPolicy::HotTarget);
        assert_eq!(config.conflict_rate, 0.3);
        assert_eq!(config.stage_timeout, Duration::from_secs(120));

        let params = file.to_amm_params();
        assert_eq!(params.swap_amount_in, 2_000_000_000_000_000_000);
        // Unspecified amounts keep their defaults.
        assert_eq!(params.approve_amount, abi::parse_units(1_000_000, 18));
    }

    #[test]
    fn test_unknown_workflow_is_refused() {
        let err = parse_workflow("staking").unwrap_err();
        assert!(matches!(err, CliError::UnknownWorkflow(_)));
    }

    #[test]
    fn test_bad_duration_is_refused() {
        let file: CampaignFile = toml::from_str(
            r#"
            endpoint = "http://127.0.0.1:3000"

            [campaign]
            actors = 4
            workflow = "trading"
            stage_timeout = "soon"
            "#,
        )
        .unwrap();
        assert!(matches!(
            file.to_engine_config(),
            Err(CliError::InvalidDuration { field: "stage_timeout", .. })
        ));
    }
}
