//! Campaign configuration.

use crate::error::ConfigError;
use crate::router::ConflictPolicy;
use std::fmt;
use std::time::Duration;

/// Which staged workflow a campaign runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Mint both tokens, approve the router, provide liquidity.
    LiquiditySetup,
    /// Swap through each pool, optionally after hot-path preparation.
    Trading,
    /// Airdrop native balance from the funder to every actor.
    Fund,
}

impl Workflow {
    /// Stable lowercase name, used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::LiquiditySetup => "liquidity-setup",
            Workflow::Trading => "trading",
            Workflow::Fund => "fund",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campaign parameters.
///
/// Built with `with_*` setters from [`CampaignConfig::default`], then
/// checked once with [`CampaignConfig::validate`] before any network
/// interaction.
#[derive(Debug, Clone)]
pub struct CampaignConfig {
    /// Number of actors N. Logical operation indices run 0..N per stage.
    pub actor_count: usize,
    /// Fraction of conflict-eligible operations remapped onto the hot
    /// assignment. Threshold is `floor(actor_count * conflict_rate)`.
    pub conflict_rate: f64,
    /// Which half of the assignment the remap replaces.
    pub conflict_policy: ConflictPolicy,
    /// Maximum operations submitted per chunk.
    pub chunk_size: usize,
    /// Budget for one operation to reach a terminal outcome.
    pub stage_timeout: Duration,
    /// Cadence of outcome polling while an operation is in flight.
    pub poll_interval: Duration,
    /// Workflow selection.
    pub workflow: Workflow,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            actor_count: 8,
            conflict_rate: 0.0,
            conflict_policy: ConflictPolicy::HotActor,
            chunk_size: 16,
            stage_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(200),
            workflow: Workflow::LiquiditySetup,
        }
    }
}

impl CampaignConfig {
    /// Set the actor count.
    pub fn with_actor_count(mut self, actor_count: usize) -> Self {
        self.actor_count = actor_count;
        self
    }

    /// Set the conflict rate.
    pub fn with_conflict_rate(mut self, conflict_rate: f64) -> Self {
        self.conflict_rate = conflict_rate;
        self
    }

    /// Set the conflict policy.
    pub fn with_conflict_policy(mut self, conflict_policy: ConflictPolicy) -> Self {
        self.conflict_policy = conflict_policy;
        self
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the per-operation confirmation budget.
    pub fn with_stage_timeout(mut self, stage_timeout: Duration) -> Self {
        self.stage_timeout = stage_timeout;
        self
    }

    /// Set the outcome polling cadence.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the workflow.
    pub fn with_workflow(mut self, workflow: Workflow) -> Self {
        self.workflow = workflow;
        self
    }

    /// Reject invalid parameters before the campaign touches the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actor_count == 0 {
            return Err(ConfigError::ZeroActors);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.stage_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if !self.conflict_rate.is_finite()
            || self.conflict_rate < 0.0
            || self.conflict_rate > 1.0
        {
            return Err(ConfigError::InvalidConflictRate(self.conflict_rate));
        }
        Ok(())
    }
}
