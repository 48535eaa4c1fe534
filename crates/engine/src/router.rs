//! Conflict routing: which actor signs, which pair is touched.
//!
//! The default topology is 1:1 — logical index `m` resolves to actor `m`
//! acting on resource pair `m`. Conflict injection remaps the first
//! `floor(M * r)` indices onto a shared hot slot so the backend's
//! contention paths get exercised. Index 0 is the designated hot slot
//! for both policies.

use stampede_types::ActorId;

use crate::error::ConfigError;

/// Which half of the (actor, pair) tuple the remap pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Remapped indices are all signed by actor 0, each still touching
    /// its own pair. Stresses per-account sequencing on the backend.
    HotActor,
    /// Remapped indices each keep their own signer but all touch pair 0.
    /// Stresses lock contention on a single resource.
    HotTarget,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HotActor => "hot-actor",
            Self::HotTarget => "hot-target",
        }
    }
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution of one logical index: who signs, which pair they touch.
///
/// `pair` is an index into the resource registry's pair space, not an
/// address. The caller owns the registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub actor: ActorId,
    pub pair: usize,
}

/// Stateless index-to-route mapping for one stage's operation set.
///
/// Everything is fixed at construction, so resolving the same index
/// twice always yields the same route, within a stage and across stages.
#[derive(Debug, Clone)]
pub struct ConflictRouter {
    policy: ConflictPolicy,
    total: usize,
    threshold: usize,
}

impl ConflictRouter {
    /// Build a router over `total` logical indices at the given rate.
    ///
    /// The hot threshold is `floor(total * rate)`, never rounded up.
    pub fn new(policy: ConflictPolicy, rate: f64, total: usize) -> Result<Self, ConfigError> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidConflictRate(rate));
        }
        let threshold = (total as f64 * rate).floor() as usize;
        Ok(Self {
            policy,
            total,
            threshold,
        })
    }

    /// Number of logical indices this router covers.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Indices below this are remapped to the hot slot.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Whether the index lands on the hot slot.
    pub fn is_hot(&self, index: usize) -> bool {
        index < self.threshold
    }

    /// Resolve one logical index.
    pub fn resolve(&self, index: usize) -> Route {
        debug_assert!(index < self.total, "index {index} out of range");
        if index < self.threshold {
            match self.policy {
                ConflictPolicy::HotActor => Route {
                    actor: ActorId(0),
                    pair: index,
                },
                ConflictPolicy::HotTarget => Route {
                    actor: ActorId(index as u32),
                    pair: 0,
                },
            }
        } else {
            Route {
                actor: ActorId(index as u32),
                pair: index,
            }
        }
    }

    /// All routes in index order.
    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        (0..self.total).map(|index| self.resolve(index))
    }

    /// Distinct (actor, pair) combinations among the remapped indices.
    ///
    /// These are the holdings the hot path relies on: each listed actor
    /// needs balance and allowance on its listed pair before a swap
    /// routed there can succeed.
    pub fn hot_requirements(&self) -> Vec<Route> {
        let mut seen = Vec::new();
        for index in 0..self.threshold {
            let route = self.resolve(index);
            if !seen.contains(&route) {
                seen.push(route);
            }
        }
        seen
    }
}
