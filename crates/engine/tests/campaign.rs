//! End-to-end campaign runs against a scripted in-memory backend.
//!
//! The scripted transport records every submission in arrival order and
//! answers status polls from a script, so the tests can assert the
//! properties the engine promises: gap-free per-actor nonces, stage
//! ordering, chunk barriers, failure isolation, and prompt cancellation.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio_util::sync::CancellationToken;

use stampede_engine::{
    ActorRegistry, Campaign, CampaignConfig, CampaignError, CallSpec, CatalogError,
    ConflictPolicy, OperationContext, PollStatus, Report, ResourceRegistry, Signer, SignerError,
    StageReport, Transport, TransportError, Workflow, WorkflowCatalog,
};
use stampede_types::{
    ActorId, Address, BlockHeight, Hash, KeyPair, Nonce, OperationPayload, Outcome,
    SignedOperation, StageKind, SubmitFailure,
};

// ═══════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════

fn actor_addr(i: u32) -> Address {
    Address::from_bytes(&[10 + i as u8; 20])
}

fn funder_addr() -> Address {
    Address::from_bytes(&[9; 20])
}

fn resource_addr(i: usize) -> Address {
    Address::from_bytes(&[0x80 + i as u8; 20])
}

fn router_addr() -> Address {
    Address::from_bytes(&[0xFE; 20])
}

/// Fast polling so tests spend no real time waiting.
fn test_config(actors: usize) -> CampaignConfig {
    CampaignConfig::default()
        .with_actor_count(actors)
        .with_chunk_size(actors.max(1))
        .with_poll_interval(Duration::from_millis(1))
        .with_stage_timeout(Duration::from_secs(5))
}

fn actor_registry(count: usize) -> ActorRegistry {
    ActorRegistry::new((0..count).map(|i| actor_addr(i as u32)).collect())
}

fn resource_registry(pairs: usize) -> ResourceRegistry {
    ResourceRegistry::new((0..2 * pairs).map(resource_addr).collect(), router_addr())
}

/// One deterministic Ed25519 key per actor id, funder included.
struct TestSigner {
    keys: HashMap<ActorId, KeyPair>,
}

impl TestSigner {
    fn for_actors(count: u32, with_funder: bool) -> Self {
        let mut keys = HashMap::new();
        for i in 0..count {
            keys.insert(ActorId(i), KeyPair::from_seed(&[i as u8 + 1; 32]));
        }
        if with_funder {
            keys.insert(ActorId(count), KeyPair::from_seed(&[0xF0; 32]));
        }
        Self { keys }
    }
}

impl Signer for TestSigner {
    fn sign(
        &self,
        actor: ActorId,
        payload: &OperationPayload,
    ) -> Result<SignedOperation, SignerError> {
        let key = self
            .keys
            .get(&actor)
            .ok_or(SignerError::UnknownActor(actor))?;
        let signature = key.sign(&payload.signing_message());
        Ok(SignedOperation {
            payload: payload.clone(),
            public_key: key.public_key(),
            signature,
        })
    }
}

/// Catalog that tags each call input with the stage name plus the pair's
/// base token, so the transport log can be sliced per stage and per pair.
struct TestCatalog {
    router: Address,
    airdrop_amount: u128,
}

impl TestCatalog {
    fn new() -> Self {
        Self {
            router: router_addr(),
            airdrop_amount: 1_000,
        }
    }
}

impl WorkflowCatalog for TestCatalog {
    fn build(&self, stage: StageKind, ctx: &OperationContext) -> Result<CallSpec, CatalogError> {
        if stage == StageKind::Airdrop {
            return Ok(CallSpec {
                target: ctx.actor,
                value: self.airdrop_amount,
                input: b"airdrop".to_vec(),
            });
        }
        let pair = ctx.pair.ok_or(CatalogError::MissingResources(stage))?;
        let target = match stage {
            StageKind::MintA | StageKind::ApproveA => pair.base,
            StageKind::MintB | StageKind::ApproveB => pair.quote,
            StageKind::ProvideLiquidity | StageKind::Swap => self.router,
            StageKind::PrepareHotPath | StageKind::Airdrop => {
                return Err(CatalogError::UnsupportedStage(stage))
            }
        };
        let mut input = stage.as_str().as_bytes().to_vec();
        input.extend_from_slice(pair.base.as_bytes());
        Ok(CallSpec {
            target,
            value: 0,
            input,
        })
    }
}

#[derive(Debug, Clone)]
struct SubmittedOp {
    from: Address,
    nonce: u64,
    target: Address,
    value: u128,
    input: Vec<u8>,
}

impl SubmittedOp {
    fn tagged(&self, stage: StageKind) -> bool {
        self.input.starts_with(stage.as_str().as_bytes())
    }

    fn touches_base(&self, base: Address) -> bool {
        self.input.ends_with(base.as_bytes())
    }
}

/// In-memory backend. Submissions confirm after a per-operation number of
/// pending polls (fixed or seeded jitter); reverts are scripted per
/// (sender, nonce); the height counter advances one block per confirmation.
struct ScriptedTransport {
    baselines: HashMap<Address, u64>,
    failing_baselines: HashSet<Address>,
    reverts: HashMap<(Address, u64), String>,
    default_pending_polls: u32,
    jitter: Option<Mutex<ChaCha8Rng>>,
    height: AtomicU64,
    submitted: Mutex<Vec<SubmittedOp>>,
    by_id: Mutex<HashMap<Hash, SubmittedOp>>,
    needed_polls: Mutex<HashMap<Hash, u32>>,
    polls_seen: Mutex<HashMap<Hash, u32>>,
    cancel_at_submission: Option<(usize, CancellationToken)>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self {
            baselines: HashMap::new(),
            failing_baselines: HashSet::new(),
            reverts: HashMap::new(),
            default_pending_polls: 1,
            jitter: None,
            height: AtomicU64::new(100),
            submitted: Mutex::new(Vec::new()),
            by_id: Mutex::new(HashMap::new()),
            needed_polls: Mutex::new(HashMap::new()),
            polls_seen: Mutex::new(HashMap::new()),
            cancel_at_submission: None,
        }
    }

    fn with_baseline(mut self, address: Address, count: u64) -> Self {
        self.baselines.insert(address, count);
        self
    }

    fn with_failing_baseline(mut self, address: Address) -> Self {
        self.failing_baselines.insert(address);
        self
    }

    fn with_revert(mut self, from: Address, nonce: u64, reason: &str) -> Self {
        self.reverts.insert((from, nonce), reason.to_string());
        self
    }

    /// Vary confirmation delay per operation so completions within a
    /// chunk land out of submission order.
    fn with_jittered_polls(mut self, seed: u64) -> Self {
        self.jitter = Some(Mutex::new(ChaCha8Rng::seed_from_u64(seed)));
        self
    }

    fn with_cancel_at_submission(mut self, ordinal: usize, token: CancellationToken) -> Self {
        self.cancel_at_submission = Some((ordinal, token));
        self
    }

    fn submitted(&self) -> Vec<SubmittedOp> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn pending_operation_count(&self, address: &Address) -> Result<u64, TransportError> {
        if self.failing_baselines.contains(address) {
            return Err(TransportError::Unavailable("backend down".into()));
        }
        Ok(*self.baselines.get(address).unwrap_or(&0))
    }

    async fn submit(&self, operation: &SignedOperation) -> Result<Hash, TransportError> {
        let id = operation.id();
        let op = SubmittedOp {
            from: operation.payload.from,
            nonce: operation.payload.nonce.0,
            target: operation.payload.target,
            value: operation.payload.value,
            input: operation.payload.input.clone(),
        };

        let ordinal = {
            let mut log = self.submitted.lock();
            log.push(op.clone());
            log.len() - 1
        };
        self.by_id.lock().insert(id, op);

        let pending = match &self.jitter {
            Some(rng) => rng.lock().gen_range(0..=3),
            None => self.default_pending_polls,
        };
        self.needed_polls.lock().insert(id, pending);

        if let Some((trigger, token)) = &self.cancel_at_submission {
            if ordinal == *trigger {
                token.cancel();
            }
        }
        Ok(id)
    }

    async fn poll_outcome(&self, id: &Hash) -> Result<PollStatus, TransportError> {
        let op = match self.by_id.lock().get(id) {
            Some(op) => op.clone(),
            None => return Err(TransportError::Malformed("unknown handle".into())),
        };
        let needed = *self.needed_polls.lock().get(id).unwrap_or(&0);
        let seen = {
            let mut polls = self.polls_seen.lock();
            let entry = polls.entry(*id).or_insert(0);
            *entry += 1;
            *entry
        };
        if seen <= needed {
            return Ok(PollStatus::Pending);
        }
        if let Some(reason) = self.reverts.get(&(op.from, op.nonce)) {
            return Ok(PollStatus::Reverted(reason.clone()));
        }
        Ok(PollStatus::Confirmed(BlockHeight(
            self.height.fetch_add(1, Ordering::SeqCst) + 1,
        )))
    }

    async fn current_height(&self) -> Result<BlockHeight, TransportError> {
        Ok(BlockHeight(self.height.load(Ordering::SeqCst)))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Assertion helpers
// ═══════════════════════════════════════════════════════════════════════

fn nonces_by_sender(ops: &[SubmittedOp]) -> HashMap<Address, Vec<u64>> {
    let mut map: HashMap<Address, Vec<u64>> = HashMap::new();
    for op in ops {
        map.entry(op.from).or_default().push(op.nonce);
    }
    map
}

/// Assert a sender's assigned nonces are exactly baseline..baseline+n.
/// Wire arrival order within a chunk is unordered, so sort first.
fn assert_contiguous(nonces: &[u64], baseline: u64) {
    let mut sorted = nonces.to_vec();
    sorted.sort_unstable();
    let expected: Vec<u64> = (baseline..baseline + nonces.len() as u64).collect();
    assert_eq!(sorted, expected);
}

fn stage_report(report: &Report, kind: StageKind) -> &StageReport {
    report
        .stages
        .iter()
        .find(|s| s.stage == kind)
        .unwrap_or_else(|| panic!("no {kind} stage in report"))
}

// ═══════════════════════════════════════════════════════════════════════
// Liquidity setup workflow
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_liquidity_setup_confirms_every_stage() {
    let transport = ScriptedTransport::new().with_jittered_polls(42);
    let signer = TestSigner::for_actors(4, false);
    let catalog = TestCatalog::new();
    let campaign = Campaign::new(test_config(4), actor_registry(4), resource_registry(4)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();

    // Five stages, four confirmations each, nothing dropped.
    assert_eq!(report.stages.len(), 5);
    for stage in &report.stages {
        assert_eq!(stage.tally.confirmed, 4, "stage {}", stage.stage);
        assert!(stage.failures.is_empty());
    }
    assert!(report.is_clean());

    // Each actor spent exactly nonces 0..=4 across the five stages.
    let ops = transport.submitted();
    assert_eq!(ops.len(), 20);
    let by_sender = nonces_by_sender(&ops);
    assert_eq!(by_sender.len(), 4);
    for nonces in by_sender.values() {
        assert_contiguous(nonces, 0);
    }

    // Stage boundaries hold: every mint-a submission precedes every
    // mint-b submission, and so on down the table.
    let order = [
        StageKind::MintA,
        StageKind::MintB,
        StageKind::ApproveA,
        StageKind::ApproveB,
        StageKind::ProvideLiquidity,
    ];
    for window in order.windows(2) {
        let last_earlier = ops.iter().rposition(|op| op.tagged(window[0])).unwrap();
        let first_later = ops.iter().position(|op| op.tagged(window[1])).unwrap();
        assert!(last_earlier < first_later, "{} overlapped {}", window[0], window[1]);
    }

    // One block per confirmation from baseline 100.
    let span = report.height_span.unwrap();
    assert_eq!(span.first, BlockHeight(100));
    assert_eq!(span.blocks(), 20);

    let latency = report.latency.unwrap();
    assert_eq!(latency.samples, 20);
}

#[tokio::test]
async fn test_nonces_start_from_backend_baseline() {
    let transport = ScriptedTransport::new().with_baseline(actor_addr(0), 5);
    let signer = TestSigner::for_actors(2, false);
    let catalog = TestCatalog::new();
    let campaign = Campaign::new(test_config(2), actor_registry(2), resource_registry(2)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();
    assert!(report.is_clean());

    let by_sender = nonces_by_sender(&transport.submitted());
    assert_contiguous(&by_sender[&actor_addr(0)], 5);
    assert_contiguous(&by_sender[&actor_addr(1)], 0);
}

#[tokio::test]
async fn test_revert_excludes_actor_from_dependent_stages() {
    // Actor 2's third operation (approve-a, nonce 2) reverts.
    let transport =
        ScriptedTransport::new().with_revert(actor_addr(2), 2, "insufficient balance");
    let signer = TestSigner::for_actors(4, false);
    let catalog = TestCatalog::new();
    let campaign = Campaign::new(test_config(4), actor_registry(4), resource_registry(4)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();

    let approve_a = stage_report(&report, StageKind::ApproveA);
    assert_eq!(approve_a.tally.confirmed, 3);
    assert_eq!(approve_a.tally.reverted, 1);
    assert_eq!(approve_a.failures.len(), 1);
    assert_eq!(approve_a.failures[0].actor, ActorId(2));
    assert!(matches!(approve_a.failures[0].outcome, Outcome::Reverted(_)));

    // The two dependent stages run without actor 2.
    for kind in [StageKind::ApproveB, StageKind::ProvideLiquidity] {
        let stage = stage_report(&report, kind);
        assert_eq!(stage.tally.confirmed, 3, "stage {kind}");
        assert_eq!(stage.tally.total(), 3, "stage {kind}");
    }

    // Actor 2 stopped after its reverted nonce; no gap, no reuse.
    let by_sender = nonces_by_sender(&transport.submitted());
    assert_eq!(by_sender[&actor_addr(2)], vec![0, 1, 2]);
    for healthy in [0u32, 1, 3] {
        assert_contiguous(&by_sender[&actor_addr(healthy)], 0);
        assert_eq!(by_sender[&actor_addr(healthy)].len(), 5);
    }
}

#[tokio::test]
async fn test_dropped_actor_runs_campaign_at_reduced_capacity() {
    let transport = ScriptedTransport::new().with_failing_baseline(actor_addr(1));
    let signer = TestSigner::for_actors(3, false);
    let catalog = TestCatalog::new();
    let campaign = Campaign::new(test_config(3), actor_registry(3), resource_registry(3)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.dropped_actors, vec![ActorId(1)]);
    assert!(!report.is_clean());
    for stage in &report.stages {
        assert_eq!(stage.tally.confirmed, 2, "stage {}", stage.stage);
    }
    // The dropped actor never reaches the wire.
    assert!(transport
        .submitted()
        .iter()
        .all(|op| op.from != actor_addr(1)));
}

#[tokio::test]
async fn test_backend_fully_down_aborts() {
    let mut transport = ScriptedTransport::new();
    for i in 0..2 {
        transport = transport.with_failing_baseline(actor_addr(i));
    }
    let signer = TestSigner::for_actors(2, false);
    let catalog = TestCatalog::new();
    let campaign = Campaign::new(test_config(2), actor_registry(2), resource_registry(2)).unwrap();

    let result = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(CampaignError::NoUsableActors)));
}

// ═══════════════════════════════════════════════════════════════════════
// Trading workflow and conflict injection
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_trading_without_conflict_is_a_single_stage() {
    let transport = ScriptedTransport::new();
    let signer = TestSigner::for_actors(4, false);
    let catalog = TestCatalog::new();
    let config = test_config(4).with_workflow(Workflow::Trading);
    let campaign = Campaign::new(config, actor_registry(4), resource_registry(4)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.stages[0].stage, StageKind::Swap);
    assert_eq!(report.stages[0].tally.confirmed, 4);

    let ops = transport.submitted();
    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| op.tagged(StageKind::Swap)));
    // Identity mapping: each actor swaps on its own pair.
    for i in 0..4usize {
        let own: Vec<_> = ops
            .iter()
            .filter(|op| op.from == actor_addr(i as u32))
            .collect();
        assert_eq!(own.len(), 1);
        assert!(own[0].touches_base(resource_addr(2 * i)));
    }
}

#[tokio::test]
async fn test_hot_target_remaps_first_indices_and_prepends_prep() {
    // floor(10 * 0.3) = 3: indices 0..2 swap on pair 0, the rest on
    // their own pairs.
    let transport = ScriptedTransport::new();
    let signer = TestSigner::for_actors(10, false);
    let catalog = TestCatalog::new();
    let config = test_config(10)
        .with_workflow(Workflow::Trading)
        .with_conflict_rate(0.3)
        .with_conflict_policy(ConflictPolicy::HotTarget);
    let campaign = Campaign::new(config, actor_registry(10), resource_registry(10)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stages.len(), 2);
    assert_eq!(report.stages[0].stage, StageKind::PrepareHotPath);
    assert_eq!(report.stages[1].stage, StageKind::Swap);
    // Three remapped holdings, a mint and an approve each.
    assert_eq!(report.stages[0].tally.confirmed, 6);
    assert_eq!(report.stages[1].tally.confirmed, 10);

    let ops = transport.submitted();
    let swaps: Vec<_> = ops.iter().filter(|op| op.tagged(StageKind::Swap)).collect();
    assert_eq!(swaps.len(), 10);
    let hot = resource_addr(0);
    assert_eq!(swaps.iter().filter(|op| op.touches_base(hot)).count(), 3);

    // Prep minted and approved the hot pair for exactly the remapped
    // actors, and nonce lanes stay contiguous through both stages.
    let prep: Vec<_> = ops
        .iter()
        .filter(|op| op.tagged(StageKind::MintA) || op.tagged(StageKind::ApproveA))
        .collect();
    assert_eq!(prep.len(), 6);
    assert!(prep.iter().all(|op| op.touches_base(hot)));

    let by_sender = nonces_by_sender(&ops);
    for i in 0..3u32 {
        assert_eq!(by_sender[&actor_addr(i)].len(), 3);
        assert_contiguous(&by_sender[&actor_addr(i)], 0);
    }
    for i in 3..10u32 {
        assert_eq!(by_sender[&actor_addr(i)], vec![0]);
    }
}

#[tokio::test]
async fn test_hot_actor_pins_the_signer() {
    // floor(4 * 0.5) = 2: actor 0 signs the first two swaps, touching
    // pair 0 and pair 1.
    let transport = ScriptedTransport::new();
    let signer = TestSigner::for_actors(4, false);
    let catalog = TestCatalog::new();
    let config = test_config(4)
        .with_workflow(Workflow::Trading)
        .with_conflict_rate(0.5)
        .with_conflict_policy(ConflictPolicy::HotActor);
    let campaign = Campaign::new(config, actor_registry(4), resource_registry(4)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();
    assert!(report.is_clean());

    let ops = transport.submitted();
    let swaps: Vec<_> = ops.iter().filter(|op| op.tagged(StageKind::Swap)).collect();
    assert_eq!(swaps.len(), 4);
    assert_eq!(
        swaps.iter().filter(|op| op.from == actor_addr(0)).count(),
        2
    );
    // Actor 1's index was remapped away; it signs nothing.
    assert!(ops.iter().all(|op| op.from != actor_addr(1)));

    // Hot actor: 2 prep holdings (4 operations) then 2 swaps.
    let by_sender = nonces_by_sender(&ops);
    assert_eq!(by_sender[&actor_addr(0)].len(), 6);
    assert_contiguous(&by_sender[&actor_addr(0)], 0);
}

// ═══════════════════════════════════════════════════════════════════════
// Fund workflow
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_fund_workflow_airdrops_from_the_funder() {
    let transport = ScriptedTransport::new().with_baseline(funder_addr(), 7);
    let signer = TestSigner::for_actors(3, true);
    let catalog = TestCatalog::new();
    let actors = ActorRegistry::new((0..3).map(actor_addr).collect()).with_funder(funder_addr());
    let config = test_config(3).with_workflow(Workflow::Fund);
    let campaign = Campaign::new(config, actors, ResourceRegistry::empty()).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.stages[0].stage, StageKind::Airdrop);
    assert_eq!(report.stages[0].tally.confirmed, 3);

    let ops = transport.submitted();
    assert_eq!(ops.len(), 3);
    let targets: HashSet<_> = ops.iter().map(|op| op.target).collect();
    assert_eq!(
        targets,
        (0..3).map(actor_addr).collect::<HashSet<_>>()
    );
    for op in &ops {
        assert_eq!(op.from, funder_addr());
        assert_eq!(op.value, 1_000);
    }
    // Funder nonces continue from its backend baseline.
    assert_contiguous(&nonces_by_sender(&ops)[&funder_addr()], 7);
}

#[tokio::test]
async fn test_fund_workflow_fails_without_funder_baseline() {
    let transport = ScriptedTransport::new().with_failing_baseline(funder_addr());
    let signer = TestSigner::for_actors(2, true);
    let catalog = TestCatalog::new();
    let actors = ActorRegistry::new((0..2).map(actor_addr).collect()).with_funder(funder_addr());
    let config = test_config(2).with_workflow(Workflow::Fund);
    let campaign = Campaign::new(config, actors, ResourceRegistry::empty()).unwrap();

    let result = campaign
        .run(&transport, &signer, &catalog, &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(CampaignError::FunderUnavailable)));
}

// ═══════════════════════════════════════════════════════════════════════
// Cancellation
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_cancellation_stops_the_campaign_promptly() {
    let cancel = CancellationToken::new();
    let transport = ScriptedTransport::new().with_cancel_at_submission(0, cancel.clone());
    let signer = TestSigner::for_actors(4, false);
    let catalog = TestCatalog::new();
    let campaign = Campaign::new(test_config(4), actor_registry(4), resource_registry(4)).unwrap();

    let report = campaign
        .run(&transport, &signer, &catalog, &cancel)
        .await
        .unwrap();

    // Only the first stage appears, fully failed, and no later stage's
    // operations ever reached the transport.
    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.stages[0].stage, StageKind::MintA);
    assert_eq!(report.stages[0].tally.submit_failed, 4);
    assert!(report.stages[0]
        .failures
        .iter()
        .all(|f| f.outcome == Outcome::SubmitFailed(SubmitFailure::Cancelled)));
    assert_eq!(transport.submitted().len(), 1);
    assert!(!report.is_clean());
}

// ═══════════════════════════════════════════════════════════════════════
// Wire envelope sanity
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_submitted_operations_verify_and_round_trip() {
    let key = KeyPair::from_seed(&[1u8; 32]);
    let payload = OperationPayload {
        from: Address::from_public_key(&key.public_key()),
        target: resource_addr(0),
        nonce: Nonce(3),
        value: 0,
        input: b"mint-a".to_vec(),
    };
    let signature = key.sign(&payload.signing_message());
    let operation = SignedOperation {
        payload,
        public_key: key.public_key(),
        signature,
    };
    assert!(operation.verify());

    let decoded = SignedOperation::from_bytes(&operation.to_bytes()).unwrap();
    assert_eq!(decoded, operation);
    assert_eq!(decoded.id(), operation.id());
}
