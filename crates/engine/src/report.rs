//! Campaign results.
//!
//! Failures are kept per stage and per actor, not just counted, so a run
//! that failed systemically (every actor failing a stage) reads
//! differently from isolated contention-induced reverts on the hot path.

use std::time::Duration;

use stampede_types::{ActorId, BlockHeight, Outcome, StageKind};

use crate::config::Workflow;
use crate::scheduler::OperationOutcome;
use crate::tracker::LatencySummary;

/// Outcome counts for one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTally {
    pub confirmed: usize,
    pub reverted: usize,
    pub submit_failed: usize,
}

impl StageTally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Confirmed(_) => self.confirmed += 1,
            Outcome::Reverted(_) => self.reverted += 1,
            Outcome::SubmitFailed(_) => self.submit_failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.confirmed + self.reverted + self.submit_failed
    }

    pub fn all_confirmed(&self) -> bool {
        self.reverted == 0 && self.submit_failed == 0
    }
}

/// One actor's non-confirmed outcome within a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub actor: ActorId,
    pub outcome: Outcome,
}

/// Results of one stage, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: StageKind,
    pub tally: StageTally,
    pub failures: Vec<FailureRecord>,
}

impl StageReport {
    /// Fold a stage's outcomes into counts plus per-actor failure records.
    pub fn from_outcomes(stage: StageKind, outcomes: &[OperationOutcome]) -> Self {
        let mut tally = StageTally::default();
        let mut failures = Vec::new();
        for result in outcomes {
            tally.record(&result.outcome);
            if !result.outcome.is_confirmed() {
                failures.push(FailureRecord {
                    actor: result.actor,
                    outcome: result.outcome.clone(),
                });
            }
        }
        Self {
            stage,
            tally,
            failures,
        }
    }
}

/// Backend heights observed at campaign start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightSpan {
    pub first: BlockHeight,
    pub last: BlockHeight,
}

impl HeightSpan {
    pub fn blocks(&self) -> u64 {
        self.last.0.saturating_sub(self.first.0)
    }
}

/// Aggregate result of one campaign run.
#[derive(Debug, Clone)]
pub struct Report {
    pub workflow: Workflow,
    pub stages: Vec<StageReport>,
    /// Actors dropped before the first stage (nonce baseline failures).
    pub dropped_actors: Vec<ActorId>,
    pub wall_clock: Duration,
    /// Present when the transport answered both height probes.
    pub height_span: Option<HeightSpan>,
    /// Present when at least one operation confirmed.
    pub latency: Option<LatencySummary>,
}

impl Report {
    /// Counts summed across all stages.
    pub fn totals(&self) -> StageTally {
        let mut total = StageTally::default();
        for stage in &self.stages {
            total.confirmed += stage.tally.confirmed;
            total.reverted += stage.tally.reverted;
            total.submit_failed += stage.tally.submit_failed;
        }
        total
    }

    /// True when every operation confirmed and no actor was dropped.
    pub fn is_clean(&self) -> bool {
        self.dropped_actors.is_empty() && self.stages.iter().all(|s| s.tally.all_confirmed())
    }

    /// Print a summary of the campaign.
    pub fn print_summary(&self) {
        println!("\n--- Campaign Report ---");
        println!("Workflow:  {}", self.workflow);
        println!("Duration:  {:?}", self.wall_clock);
        if let Some(span) = &self.height_span {
            println!(
                "Heights:   {} -> {} ({} blocks)",
                span.first,
                span.last,
                span.blocks()
            );
        }
        if !self.dropped_actors.is_empty() {
            println!(
                "Dropped:   {} actor(s) failed nonce initialization",
                self.dropped_actors.len()
            );
        }

        println!();
        println!("Stages:");
        for stage in &self.stages {
            println!(
                "  {:<18} {} confirmed, {} reverted, {} failed",
                stage.stage, stage.tally.confirmed, stage.tally.reverted, stage.tally.submit_failed
            );
            for failure in &stage.failures {
                println!("    {}: {}", failure.actor, failure.outcome);
            }
        }

        let totals = self.totals();
        println!();
        println!(
            "Total:     {} confirmed, {} reverted, {} failed",
            totals.confirmed, totals.reverted, totals.submit_failed
        );

        if let Some(latency) = &self.latency {
            println!();
            println!("Confirmation latency ({} samples):", latency.samples);
            println!("  P50:  {:?}", latency.p50);
            println!("  P90:  {:?}", latency.p90);
            println!("  P99:  {:?}", latency.p99);
            println!("  Max:  {:?}", latency.max);
            println!("  Avg:  {:?}", latency.mean);
        }
    }
}
