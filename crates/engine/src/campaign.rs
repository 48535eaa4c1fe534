//! Campaign orchestration.
//!
//! A campaign walks the selected workflow's stage table. For each stage
//! it resolves routes, assigns nonces, has the external signer wrap the
//! payloads, and hands the batch to the scheduler. Nonces are assigned
//! sequentially per actor before any concurrent submission starts, so
//! per-actor ordering holds without locks.
//!
//! Failure policy: configuration problems abort before any network
//! traffic; an actor whose baseline query fails is dropped for the whole
//! run; an actor whose operation fails sits out later dependent stages;
//! everything else proceeds and lands in the report.

use std::collections::HashSet;
use std::time::Instant;

use stampede_types::{ActorId, OperationPayload, StageKind};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{CampaignConfig, Workflow};
use crate::error::{CampaignError, ConfigError};
use crate::nonce::{NonceAllocator, NonceInit};
use crate::registry::{ActorRegistry, ResourceRegistry};
use crate::report::{HeightSpan, Report, StageReport};
use crate::router::{ConflictRouter, Route};
use crate::scheduler::{BatchScheduler, PreparedOperation};
use crate::stage::{Dependency, RoutingMode, StageDescriptor, StageSequencer};
use crate::tracker::ConfirmationTracker;
use crate::traits::{OperationContext, Signer, Transport, WorkflowCatalog};

/// One fully-configured campaign. Build once, run once.
pub struct Campaign {
    config: CampaignConfig,
    actors: ActorRegistry,
    resources: ResourceRegistry,
}

impl Campaign {
    /// Validate the configuration against the registries.
    pub fn new(
        config: CampaignConfig,
        actors: ActorRegistry,
        resources: ResourceRegistry,
    ) -> Result<Self, CampaignError> {
        config.validate()?;
        if config.actor_count != actors.len() {
            return Err(ConfigError::ActorCountMismatch {
                configured: config.actor_count,
                registered: actors.len(),
            }
            .into());
        }
        match config.workflow {
            Workflow::LiquiditySetup | Workflow::Trading => {
                if resources.pair_count() < config.actor_count {
                    return Err(ConfigError::InsufficientResources {
                        needed: config.actor_count,
                        available: resources.pair_count(),
                    }
                    .into());
                }
            }
            Workflow::Fund => {
                if actors.funder().is_none() {
                    return Err(CampaignError::MissingFunder);
                }
            }
        }
        Ok(Self {
            config,
            actors,
            resources,
        })
    }

    /// Run the campaign to completion (or cancellation) and report.
    pub async fn run(
        &self,
        transport: &dyn Transport,
        signer: &dyn Signer,
        catalog: &dyn WorkflowCatalog,
        cancel: &CancellationToken,
    ) -> Result<Report, CampaignError> {
        let started = Instant::now();
        let first_height = transport.current_height().await.ok();

        info!(
            workflow = %self.config.workflow,
            actors = self.config.actor_count,
            conflict_rate = self.config.conflict_rate,
            policy = %self.config.conflict_policy,
            chunk_size = self.config.chunk_size,
            "starting campaign"
        );

        let NonceInit {
            mut allocator,
            dropped,
        } = NonceAllocator::initialize(transport, &self.actors).await;

        if self.config.workflow == Workflow::Fund {
            let funder_ready = self
                .actors
                .funder()
                .is_some_and(|funder| allocator.is_initialized(funder.id));
            if !funder_ready {
                return Err(CampaignError::FunderUnavailable);
            }
        }
        let usable = self
            .actors
            .actors()
            .iter()
            .filter(|record| allocator.is_initialized(record.id))
            .count();
        if usable == 0 {
            return Err(CampaignError::NoUsableActors);
        }
        if !dropped.is_empty() {
            warn!(
                dropped = dropped.len(),
                usable, "running at reduced capacity"
            );
        }

        let router = ConflictRouter::new(
            self.config.conflict_policy,
            self.config.conflict_rate,
            self.config.actor_count,
        )?;
        // Conflict remapping moves swaps onto holdings the setup stages
        // never created; prepend the preparation stage whenever any index
        // is remapped.
        let with_prep = router.threshold() > 0;
        let sequencer = StageSequencer::for_workflow(self.config.workflow, with_prep)?;

        let scheduler = BatchScheduler::new(self.config.chunk_size);
        let tracker = ConfirmationTracker::new(self.config.poll_interval, self.config.stage_timeout);

        let mut failed: HashSet<ActorId> = HashSet::new();
        let mut stages = Vec::with_capacity(sequencer.len());

        for descriptor in sequencer.stages() {
            if cancel.is_cancelled() {
                info!(stage = %descriptor.kind, "campaign cancelled, stopping before stage");
                break;
            }

            let operations =
                self.compose_stage(descriptor, &router, &mut allocator, signer, catalog, &failed)?;
            if operations.is_empty() {
                info!(stage = %descriptor.kind, "no eligible operations, skipping stage");
                stages.push(StageReport::from_outcomes(descriptor.kind, &[]));
                continue;
            }

            info!(
                stage = %descriptor.kind,
                operations = operations.len(),
                "running stage"
            );
            let outcomes = scheduler
                .run_stage(transport, &tracker, operations, cancel)
                .await;
            for result in &outcomes {
                if !result.outcome.is_confirmed() {
                    failed.insert(result.actor);
                }
            }

            let stage_report = StageReport::from_outcomes(descriptor.kind, &outcomes);
            info!(
                stage = %descriptor.kind,
                confirmed = stage_report.tally.confirmed,
                reverted = stage_report.tally.reverted,
                submit_failed = stage_report.tally.submit_failed,
                "stage complete"
            );
            stages.push(stage_report);
        }

        let last_height = transport.current_height().await.ok();
        let height_span = match (first_height, last_height) {
            (Some(first), Some(last)) => Some(HeightSpan { first, last }),
            _ => None,
        };

        Ok(Report {
            workflow: self.config.workflow,
            stages,
            dropped_actors: dropped,
            wall_clock: started.elapsed(),
            height_span,
            latency: tracker.latency_summary(),
        })
    }

    fn compose_stage(
        &self,
        descriptor: &StageDescriptor,
        router: &ConflictRouter,
        allocator: &mut NonceAllocator,
        signer: &dyn Signer,
        catalog: &dyn WorkflowCatalog,
        failed: &HashSet<ActorId>,
    ) -> Result<Vec<PreparedOperation>, CampaignError> {
        match descriptor.kind {
            StageKind::Airdrop => self.compose_airdrops(allocator, signer, catalog),
            StageKind::PrepareHotPath => {
                self.compose_hot_path_prep(router, allocator, signer, catalog)
            }
            kind => self.compose_routed(descriptor, kind, router, allocator, signer, catalog, failed),
        }
    }

    /// The common case: one operation per logical index, routed.
    #[allow(clippy::too_many_arguments)]
    fn compose_routed(
        &self,
        descriptor: &StageDescriptor,
        kind: StageKind,
        router: &ConflictRouter,
        allocator: &mut NonceAllocator,
        signer: &dyn Signer,
        catalog: &dyn WorkflowCatalog,
        failed: &HashSet<ActorId>,
    ) -> Result<Vec<PreparedOperation>, CampaignError> {
        let independent = descriptor.dependency == Dependency::Independent;
        let mut operations = Vec::with_capacity(self.config.actor_count);
        for index in 0..self.config.actor_count {
            let route = match descriptor.routing {
                RoutingMode::Identity => Route {
                    actor: ActorId(index as u32),
                    pair: index,
                },
                RoutingMode::ConflictEligible => router.resolve(index),
            };
            // The signer must hold a usable lane, and a dependent stage
            // skips anyone with an earlier failure.
            if !allocator.is_initialized(route.actor)
                || (!independent && failed.contains(&route.actor))
            {
                continue;
            }
            let context = OperationContext {
                actor: self.actor_address(route.actor)?,
                pair: self.resources.pair(route.pair),
            };
            operations.push(self.prepare(
                kind,
                kind,
                route.actor,
                route.actor,
                &context,
                allocator,
                signer,
                catalog,
            )?);
        }
        Ok(operations)
    }

    /// Mint + approve for every holding the conflict remap relies on.
    fn compose_hot_path_prep(
        &self,
        router: &ConflictRouter,
        allocator: &mut NonceAllocator,
        signer: &dyn Signer,
        catalog: &dyn WorkflowCatalog,
    ) -> Result<Vec<PreparedOperation>, CampaignError> {
        let mut operations = Vec::new();
        for route in router.hot_requirements() {
            if !allocator.is_initialized(route.actor) {
                continue;
            }
            let context = OperationContext {
                actor: self.actor_address(route.actor)?,
                pair: self.resources.pair(route.pair),
            };
            // Swaps spend the pair's base token, so each remapped holding
            // needs a base-token balance and router allowance.
            for builder in [StageKind::MintA, StageKind::ApproveA] {
                operations.push(self.prepare(
                    StageKind::PrepareHotPath,
                    builder,
                    route.actor,
                    route.actor,
                    &context,
                    allocator,
                    signer,
                    catalog,
                )?);
            }
        }
        Ok(operations)
    }

    /// One funder-signed transfer per registered actor.
    fn compose_airdrops(
        &self,
        allocator: &mut NonceAllocator,
        signer: &dyn Signer,
        catalog: &dyn WorkflowCatalog,
    ) -> Result<Vec<PreparedOperation>, CampaignError> {
        let funder = self.actors.funder().ok_or(CampaignError::MissingFunder)?;
        let mut operations = Vec::with_capacity(self.actors.len());
        for record in self.actors.actors() {
            let context = OperationContext {
                actor: record.address,
                pair: None,
            };
            operations.push(self.prepare(
                StageKind::Airdrop,
                StageKind::Airdrop,
                funder.id,
                record.id,
                &context,
                allocator,
                signer,
                catalog,
            )?);
        }
        Ok(operations)
    }

    /// Build, nonce, and sign one operation.
    ///
    /// `stage` is what the operation is recorded under; `builder` keys the
    /// catalog (the hot-path stage reuses the mint and approve builders).
    /// `attributed` is the actor charged with the outcome, which for
    /// airdrops is the recipient rather than the signing funder.
    #[allow(clippy::too_many_arguments)]
    fn prepare(
        &self,
        stage: StageKind,
        builder: StageKind,
        signer_id: ActorId,
        attributed: ActorId,
        context: &OperationContext,
        allocator: &mut NonceAllocator,
        signer: &dyn Signer,
        catalog: &dyn WorkflowCatalog,
    ) -> Result<PreparedOperation, CampaignError> {
        let call = catalog
            .build(builder, context)
            .map_err(|source| CampaignError::Catalog { stage, source })?;
        let nonce = allocator.next(signer_id)?;
        let payload = OperationPayload {
            from: self.actor_address(signer_id)?,
            target: call.target,
            nonce,
            value: call.value,
            input: call.input,
        };
        let operation = signer
            .sign(signer_id, &payload)
            .map_err(|source| CampaignError::Signer {
                actor: signer_id,
                source,
            })?;
        Ok(PreparedOperation {
            stage,
            actor: attributed,
            operation,
        })
    }

    fn actor_address(&self, id: ActorId) -> Result<stampede_types::Address, CampaignError> {
        self.actors
            .get(id)
            .map(|record| record.address)
            .ok_or_else(|| crate::error::NonceError::UnknownActor(id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampede_types::Address;

    fn addr(byte: u8) -> Address {
        Address::from_bytes(&[byte; 20])
    }

    fn registries(actors: usize, pairs: usize) -> (ActorRegistry, ResourceRegistry) {
        let actor_registry =
            ActorRegistry::new((0..actors).map(|i| addr(i as u8 + 1)).collect());
        let resource_registry = ResourceRegistry::new(
            (0..2 * pairs).map(|i| addr(0x80 + i as u8)).collect(),
            addr(0xFF),
        );
        (actor_registry, resource_registry)
    }

    #[test]
    fn test_actor_count_mismatch_rejected() {
        let (actors, resources) = registries(3, 3);
        let config = CampaignConfig::default().with_actor_count(4);
        let result = Campaign::new(config, actors, resources);
        assert!(matches!(
            result,
            Err(CampaignError::Config(ConfigError::ActorCountMismatch {
                configured: 4,
                registered: 3,
            }))
        ));
    }

    #[test]
    fn test_insufficient_pairs_rejected() {
        let (actors, resources) = registries(4, 2);
        let config = CampaignConfig::default().with_actor_count(4);
        let result = Campaign::new(config, actors, resources);
        assert!(matches!(
            result,
            Err(CampaignError::Config(ConfigError::InsufficientResources {
                needed: 4,
                available: 2,
            }))
        ));
    }

    #[test]
    fn test_fund_workflow_needs_a_funder() {
        let (actors, _) = registries(2, 0);
        let config = CampaignConfig::default()
            .with_actor_count(2)
            .with_workflow(Workflow::Fund);
        let result = Campaign::new(config, actors, ResourceRegistry::empty());
        assert!(matches!(result, Err(CampaignError::MissingFunder)));

        let actors = ActorRegistry::new(vec![addr(1), addr(2)]).with_funder(addr(9));
        let config = CampaignConfig::default()
            .with_actor_count(2)
            .with_workflow(Workflow::Fund);
        assert!(Campaign::new(config, actors, ResourceRegistry::empty()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected_before_any_network_use() {
        let (actors, resources) = registries(2, 2);
        let config = CampaignConfig::default()
            .with_actor_count(2)
            .with_conflict_rate(1.5);
        let result = Campaign::new(config, actors, resources);
        assert!(matches!(
            result,
            Err(CampaignError::Config(ConfigError::InvalidConflictRate(_)))
        ));
    }
}
