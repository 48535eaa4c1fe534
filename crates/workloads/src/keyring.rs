//! Deterministic campaign keyring.

use stampede_engine::{Signer, SignerError};
use stampede_types::{ActorId, Address, Hash, KeyPair, OperationPayload, SignedOperation};

/// Domain tag mixed into per-actor seed derivation.
const DOMAIN_ACTOR_KEY: &[u8] = b"actor_key_v1:";

/// Key material for every actor in a campaign, funder included.
///
/// Keys derive deterministically from a campaign seed, so the same seed
/// and actor count always reproduce the same addresses and genesis
/// allocations stay valid across runs. The funder, when derived, signs
/// under the registry slot one past the last actor.
pub struct KeyringSigner {
    keys: Vec<KeyPair>,
    funder: Option<KeyPair>,
}

impl KeyringSigner {
    /// Derive `count` actor keys from a campaign seed.
    pub fn derive(seed: u64, count: usize) -> Self {
        let keys = (0..count).map(|i| derive_key(seed, i as u64)).collect();
        Self { keys, funder: None }
    }

    /// Derive actor keys plus a funder key.
    pub fn derive_with_funder(seed: u64, count: usize) -> Self {
        let mut ring = Self::derive(seed, count);
        ring.funder = Some(derive_key(seed, u64::MAX));
        ring
    }

    /// Build a keyring from explicit key material.
    pub fn from_keys(keys: Vec<KeyPair>, funder: Option<KeyPair>) -> Self {
        Self { keys, funder }
    }

    /// Number of actor keys, funder excluded.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Actor addresses in id order.
    pub fn addresses(&self) -> Vec<Address> {
        self.keys
            .iter()
            .map(|key| Address::from_public_key(&key.public_key()))
            .collect()
    }

    /// Funder address, when a funder key is present.
    pub fn funder_address(&self) -> Option<Address> {
        self.funder
            .as_ref()
            .map(|key| Address::from_public_key(&key.public_key()))
    }

    /// Actor keys in id order.
    pub fn keys(&self) -> &[KeyPair] {
        &self.keys
    }

    /// The funder key, when present.
    pub fn funder_key(&self) -> Option<&KeyPair> {
        self.funder.as_ref()
    }

    fn key(&self, actor: ActorId) -> Option<&KeyPair> {
        match self.keys.get(actor.index()) {
            Some(key) => Some(key),
            None if actor.index() == self.keys.len() => self.funder.as_ref(),
            None => None,
        }
    }
}

fn derive_key(seed: u64, index: u64) -> KeyPair {
    let digest = Hash::from_parts(&[
        DOMAIN_ACTOR_KEY,
        &seed.to_le_bytes(),
        &index.to_le_bytes(),
    ]);
    KeyPair::from_seed(digest.as_bytes())
}

impl Signer for KeyringSigner {
    fn sign(
        &self,
        actor: ActorId,
        payload: &OperationPayload,
    ) -> Result<SignedOperation, SignerError> {
        let key = self.key(actor).ok_or(SignerError::UnknownActor(actor))?;
        let signature = key.sign(&payload.signing_message());
        Ok(SignedOperation {
            payload: payload.clone(),
            public_key: key.public_key(),
            signature,
        })
    }
}
