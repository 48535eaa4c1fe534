//! Actor and resource registries.
//!
//! Both are arrays indexed by the stable id assigned at creation — lookups
//! are O(1) slot reads, never searches.

use crate::traits::ResourcePairAddresses;
use stampede_types::{ActorId, Address, ResourceId};

/// One signing identity in the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorRecord {
    /// Stable registry index.
    pub id: ActorId,
    /// On-chain address.
    pub address: Address,
}

/// The campaign's actors, plus an optional funder.
///
/// The funder finances the fund workflow's airdrops. It sits outside the
/// 0..N actor index space but still needs a nonce lane, so it takes the
/// synthetic id N.
#[derive(Debug, Clone)]
pub struct ActorRegistry {
    actors: Vec<ActorRecord>,
    funder: Option<ActorRecord>,
}

impl ActorRegistry {
    /// Build a registry from actor addresses, ids assigned in order.
    pub fn new(addresses: Vec<Address>) -> Self {
        let actors = addresses
            .into_iter()
            .enumerate()
            .map(|(i, address)| ActorRecord {
                id: ActorId(i as u32),
                address,
            })
            .collect();
        Self {
            actors,
            funder: None,
        }
    }

    /// Attach a funder account. Its id is one past the last actor.
    pub fn with_funder(mut self, address: Address) -> Self {
        let id = ActorId(self.actors.len() as u32);
        self.funder = Some(ActorRecord { id, address });
        self
    }

    /// Number of campaign actors (excluding the funder).
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when the registry holds no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Look up an actor (or the funder, by its synthetic id).
    pub fn get(&self, id: ActorId) -> Option<&ActorRecord> {
        if let Some(funder) = &self.funder {
            if funder.id == id {
                return Some(funder);
            }
        }
        self.actors.get(id.index())
    }

    /// The funder record, if one was attached.
    pub fn funder(&self) -> Option<&ActorRecord> {
        self.funder.as_ref()
    }

    /// Campaign actors in id order.
    pub fn actors(&self) -> &[ActorRecord] {
        &self.actors
    }

    /// Actors plus the funder, for nonce initialization.
    pub fn all_records(&self) -> impl Iterator<Item = &ActorRecord> {
        self.actors.iter().chain(self.funder.iter())
    }

    /// Nonce lanes needed: one per actor, plus the funder's.
    pub fn lane_count(&self) -> usize {
        self.actors.len() + usize::from(self.funder.is_some())
    }
}

/// The campaign's on-chain targets: an even list of token resources plus
/// the AMM router they trade through.
///
/// Pair `m` is `(resource[2m], resource[2m+1])` — the default topology
/// gives actor `m` pair `m`.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    resources: Vec<Address>,
    router: Address,
}

impl ResourceRegistry {
    /// Build a registry from resource addresses and the router address.
    pub fn new(resources: Vec<Address>, router: Address) -> Self {
        Self { resources, router }
    }

    /// A registry with no resources, for workflows that touch none.
    pub fn empty() -> Self {
        Self {
            resources: Vec::new(),
            router: Address::ZERO,
        }
    }

    /// Number of complete pairs.
    pub fn pair_count(&self) -> usize {
        self.resources.len() / 2
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when the registry holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Address of one resource.
    pub fn address(&self, id: ResourceId) -> Option<Address> {
        self.resources.get(id.index()).copied()
    }

    /// Addresses of pair `m`.
    pub fn pair(&self, m: usize) -> Option<ResourcePairAddresses> {
        let base = self.resources.get(2 * m)?;
        let quote = self.resources.get(2 * m + 1)?;
        Some(ResourcePairAddresses {
            base: *base,
            quote: *quote,
        })
    }

    /// The AMM router address.
    pub fn router(&self) -> Address {
        self.router
    }
}
