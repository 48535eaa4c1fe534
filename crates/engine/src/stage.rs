//! Stage tables and dependency ordering.
//!
//! A workflow is a list of stage descriptors. Each descriptor names the
//! stage it depends on, if any, and whether its operations are eligible
//! for conflict remapping. The sequencer validates the table and yields
//! stages in dependency order; the campaign walks that order, finishing
//! each dependent stage before starting the next.

use std::collections::HashMap;

use stampede_types::StageKind;

use crate::config::Workflow;
use crate::error::SequenceError;

/// Ordering requirement of one stage relative to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// No ordering constraint against sibling stages.
    Independent,
    /// Must not start until the named stage's operations are terminal.
    DependsOn(StageKind),
}

/// How the conflict router applies to a stage's operation set.
///
/// Setup stages always use the identity mapping: remapping a mint or an
/// approval would leave the default actors without the holdings later
/// stages assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// Logical index `m` resolves to actor `m` on pair `m`, always.
    Identity,
    /// The configured conflict rate and policy apply.
    ConflictEligible,
}

/// One stage in a workflow table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    pub kind: StageKind,
    pub dependency: Dependency,
    pub routing: RoutingMode,
}

impl StageDescriptor {
    pub fn independent(kind: StageKind, routing: RoutingMode) -> Self {
        Self {
            kind,
            dependency: Dependency::Independent,
            routing,
        }
    }

    pub fn depends_on(kind: StageKind, dependency: StageKind, routing: RoutingMode) -> Self {
        Self {
            kind,
            dependency: Dependency::DependsOn(dependency),
            routing,
        }
    }
}

/// A validated stage table in dependency order.
#[derive(Debug, Clone)]
pub struct StageSequencer {
    stages: Vec<StageDescriptor>,
}

impl StageSequencer {
    /// The canonical table for a workflow.
    ///
    /// `with_hot_prep` prefixes the trading table with a hot-path
    /// preparation stage; it has no effect on the other workflows.
    pub fn for_workflow(workflow: Workflow, with_hot_prep: bool) -> Result<Self, SequenceError> {
        use RoutingMode::{ConflictEligible, Identity};
        use StageKind::*;

        let table = match workflow {
            Workflow::LiquiditySetup => vec![
                StageDescriptor::independent(MintA, Identity),
                StageDescriptor::depends_on(MintB, MintA, Identity),
                StageDescriptor::depends_on(ApproveA, MintB, Identity),
                StageDescriptor::depends_on(ApproveB, ApproveA, Identity),
                StageDescriptor::depends_on(ProvideLiquidity, ApproveB, Identity),
            ],
            Workflow::Trading if with_hot_prep => vec![
                StageDescriptor::independent(PrepareHotPath, Identity),
                StageDescriptor::depends_on(Swap, PrepareHotPath, ConflictEligible),
            ],
            Workflow::Trading => {
                vec![StageDescriptor::independent(Swap, ConflictEligible)]
            }
            Workflow::Fund => vec![StageDescriptor::independent(Airdrop, Identity)],
        };
        Self::from_descriptors(table)
    }

    /// Validate an arbitrary table and order it by dependency.
    ///
    /// Duplicate stages, dependencies on absent stages, and dependency
    /// cycles are all refused. Input order is preserved wherever the
    /// partial order allows.
    pub fn from_descriptors(descriptors: Vec<StageDescriptor>) -> Result<Self, SequenceError> {
        let mut positions = HashMap::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            if positions.insert(descriptor.kind, index).is_some() {
                return Err(SequenceError::DuplicateStage(descriptor.kind));
            }
        }

        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            InProgress,
            Done,
        }

        // Every node has at most one outgoing edge, so a traversal is a
        // chain walk. Revisiting an in-progress node means the chain
        // looped.
        let mut marks = vec![Mark::New; descriptors.len()];
        let mut ordered = Vec::with_capacity(descriptors.len());
        for start in 0..descriptors.len() {
            let mut chain = Vec::new();
            let mut current = start;
            loop {
                match marks[current] {
                    Mark::Done => break,
                    Mark::InProgress => {
                        return Err(SequenceError::CycleDetected(descriptors[current].kind));
                    }
                    Mark::New => {}
                }
                marks[current] = Mark::InProgress;
                chain.push(current);
                match descriptors[current].dependency {
                    Dependency::Independent => break,
                    Dependency::DependsOn(dependency) => {
                        current = *positions.get(&dependency).ok_or(
                            SequenceError::UnknownDependency {
                                stage: descriptors[current].kind,
                                dependency,
                            },
                        )?;
                    }
                }
            }
            // The chain was walked dependent-first; emit it in reverse.
            for index in chain.into_iter().rev() {
                marks[index] = Mark::Done;
                ordered.push(descriptors[index]);
            }
        }

        Ok(Self { stages: ordered })
    }

    /// Stages in dependency order.
    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
