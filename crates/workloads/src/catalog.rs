//! Workload catalog for a V2-style pair router.

use stampede_engine::{CallSpec, CatalogError, OperationContext, WorkflowCatalog};
use stampede_types::{Address, StageKind};

use crate::abi::{self, CallBuilder};

/// Router deadline passed with liquidity and swap calls: 2100-01-01 UTC.
/// Fixed so identical campaigns produce identical call bytes.
const FAR_FUTURE_DEADLINE: u64 = 4_102_444_800;

/// Call amounts for the AMM stages.
#[derive(Debug, Clone)]
pub struct AmmParams {
    /// Allowance granted to the router per approval.
    pub approve_amount: u128,
    /// Tokens deposited per pair side when providing liquidity.
    pub liquidity_amount: u128,
    /// Input amount per swap.
    pub swap_amount_in: u128,
    /// Minimum acceptable swap output.
    pub swap_min_out: u128,
    /// Native value attached to each airdrop.
    pub airdrop_amount: u128,
    /// Unix-timestamp deadline passed to router calls.
    pub deadline: u64,
}

impl Default for AmmParams {
    fn default() -> Self {
        Self {
            approve_amount: abi::parse_units(1_000_000, 18),
            liquidity_amount: abi::parse_units(10_000, 18),
            swap_amount_in: abi::parse_units(1, 18),
            swap_min_out: 0,
            airdrop_amount: abi::parse_units(1, 18),
            deadline: FAR_FUTURE_DEADLINE,
        }
    }
}

/// Builds the call for each canonical AMM stage.
///
/// Mint stages call the token's argument-less `mint()`, which credits the
/// sender a fixed amount. Approve stages grant the router an allowance on
/// one pair side. `ProvideLiquidity` deposits both sides through the
/// router with zero minimums, and `Swap` trades base for quote along the
/// pair path, output returned to the sender. `Airdrop` is a plain value
/// transfer with no call input.
pub struct AmmCatalog {
    router: Address,
    params: AmmParams,
}

impl AmmCatalog {
    pub fn new(router: Address) -> Self {
        Self {
            router,
            params: AmmParams::default(),
        }
    }

    pub fn with_params(router: Address, params: AmmParams) -> Self {
        Self { router, params }
    }
}

impl WorkflowCatalog for AmmCatalog {
    fn build(&self, stage: StageKind, ctx: &OperationContext) -> Result<CallSpec, CatalogError> {
        if stage == StageKind::Airdrop {
            return Ok(CallSpec {
                target: ctx.actor,
                value: self.params.airdrop_amount,
                input: Vec::new(),
            });
        }

        let pair = ctx.pair.ok_or(CatalogError::MissingResources(stage))?;
        let spec = match stage {
            StageKind::MintA => CallSpec {
                target: pair.base,
                value: 0,
                input: CallBuilder::new(abi::MINT).build(),
            },
            StageKind::MintB => CallSpec {
                target: pair.quote,
                value: 0,
                input: CallBuilder::new(abi::MINT).build(),
            },
            StageKind::ApproveA => CallSpec {
                target: pair.base,
                value: 0,
                input: self.approve_input(),
            },
            StageKind::ApproveB => CallSpec {
                target: pair.quote,
                value: 0,
                input: self.approve_input(),
            },
            StageKind::ProvideLiquidity => CallSpec {
                target: self.router,
                value: 0,
                input: CallBuilder::new(abi::ADD_LIQUIDITY)
                    .address(pair.base)
                    .address(pair.quote)
                    .uint(self.params.liquidity_amount)
                    .uint(self.params.liquidity_amount)
                    .uint(0)
                    .uint(0)
                    .address(ctx.actor)
                    .uint(self.params.deadline as u128)
                    .build(),
            },
            StageKind::Swap => CallSpec {
                target: self.router,
                value: 0,
                input: CallBuilder::new(abi::SWAP_EXACT_TOKENS_FOR_TOKENS)
                    .uint(self.params.swap_amount_in)
                    .uint(self.params.swap_min_out)
                    .address_array(&[pair.base, pair.quote])
                    .address(ctx.actor)
                    .uint(self.params.deadline as u128)
                    .build(),
            },
            StageKind::PrepareHotPath | StageKind::Airdrop => {
                return Err(CatalogError::UnsupportedStage(stage))
            }
        };
        Ok(spec)
    }
}

impl AmmCatalog {
    fn approve_input(&self) -> Vec<u8> {
        CallBuilder::new(abi::APPROVE)
            .address(self.router)
            .uint(self.params.approve_amount)
            .build()
    }
}
