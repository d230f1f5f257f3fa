//! # Types
//!
//! Records shared by every module of the launchpad.
//!
//! ## Config / State split
//!
//! A project is stored as three ledger entries:
//!
//! - [`ProjectConfig`]: written once at registration, never mutated.
//! - [`ProjectState`]: the `enabled` flag and running raised amount, written
//!   on every invest, disinvest and refund.
//! - the additional-info map, written only by `update_additional_info`.
//!
//! The public API returns the reconstructed [`Project`].
//!
//! ## Lifecycle
//!
//! ```text
//! Registered(enabled) ──cancel (now <= end)──► Cancelled(disabled)
//!        │                                       ├── refund / refund_all
//!        │                                       └── claim_liquidated_damage(_all)
//!        └──withdraw (now >= token_release)──► Withdrawn (terminal)
//! ```
//!
//! Nothing is ever deleted: "destroyed" is always a flag (`enabled = false`,
//! `exited = true`, `claimed = true`).

use soroban_sdk::{contracttype, Address, BytesN, Map, String};

// ── Fixed-point constants ────────────────────────────────────────────

/// Upper bound on the number of vesting periods of one project.
pub const MAX_PERIOD: u32 = 20;

/// Denominator of every proportion: `100_000_000` is 100%.
pub const PROPORTION_SCALE: u32 = 100_000_000;

/// Scaling constant applied around the presale price.
pub const MANTISSA: i128 = 100_000_000;

/// Global liquidated-damage proportion installed by `init` (10%).
pub const DEFAULT_LIQUIDATED_DAMAGE_PROPORTION: u32 = 10_000_000;

/// Largest list a bulk entry point will walk in one call.
pub const MAX_BATCH_SIZE: u32 = 50;

/// Input of `register`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterParams {
    /// Token investors pay with.
    pub accepted_token: Address,
    /// Token being sold; `issue_amount` of it is escrowed at registration.
    pub project_token: Address,
    /// Free-form label, e.g. "price sale".
    pub crowdfunding_type: String,
    pub issue_amount: i128,
    /// Project tokens per accepted unit, scaled by [`MANTISSA`].
    pub presale_price: i128,
    /// Informational; listing is handled off-contract.
    pub public_sale_price: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub token_release_time: u64,
    pub unlock_time: u64,
    pub min_subscription: i128,
    pub max_subscription: i128,
    /// When a whitelist is created here, disable it immediately if `false`.
    pub enable_whitelist: bool,
    /// Link an existing whitelist instead of creating one.
    pub whitelist_id: Option<BytesN<32>>,
    pub whitelist_url: String,
    /// Burn the unsold project tokens instead of returning them.
    pub burn_rest_token: bool,
    pub total_period: u32,
    pub first_distribute_proportion: u32,
    pub rest_distribute_proportion: u32,
    /// Seconds between two consecutive vesting periods.
    pub period_duration: u64,
    /// Per-project override of the global liquidated-damage proportion.
    pub liquidated_damage_proportion: Option<u32>,
    pub additional_info: Map<String, String>,
}

/// Immutable project configuration, written once at registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: BytesN<32>,
    pub creator: Address,
    pub escrow: BytesN<32>,
    pub accepted_token: Address,
    pub project_token: Address,
    pub crowdfunding_type: String,
    pub issue_amount: i128,
    pub presale_price: i128,
    pub public_sale_price: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub token_release_time: u64,
    pub unlock_time: u64,
    pub min_subscription: i128,
    pub max_subscription: i128,
    pub target_raised: i128,
    pub burn_rest_token: bool,
    pub liquidated_damage_proportion: Option<u32>,
}

/// Mutable project state, small so the frequent invest writes stay cheap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub enabled: bool,
    pub current_raised: i128,
}

/// Full project record returned by the public API.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// `sha256(params_xdr || creator_xdr)`.
    pub id: BytesN<32>,
    pub creator: Address,
    /// Escrow sub-account holding this project's funds.
    pub escrow: BytesN<32>,
    pub accepted_token: Address,
    pub project_token: Address,
    pub crowdfunding_type: String,
    pub issue_amount: i128,
    pub presale_price: i128,
    pub public_sale_price: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub token_release_time: u64,
    pub unlock_time: u64,
    pub min_subscription: i128,
    pub max_subscription: i128,
    /// `issue_amount * MANTISSA / presale_price`, truncated.
    pub target_raised: i128,
    pub current_raised: i128,
    /// Flips `true -> false` once, on cancel.
    pub enabled: bool,
    pub burn_rest_token: bool,
    /// `None` means the global default applies.
    pub liquidated_damage_proportion: Option<u32>,
    pub additional_info: Map<String, String>,
}

impl Project {
    pub fn from_parts(
        config: ProjectConfig,
        state: ProjectState,
        additional_info: Map<String, String>,
    ) -> Self {
        Project {
            id: config.id,
            creator: config.creator,
            escrow: config.escrow,
            accepted_token: config.accepted_token,
            project_token: config.project_token,
            crowdfunding_type: config.crowdfunding_type,
            issue_amount: config.issue_amount,
            presale_price: config.presale_price,
            public_sale_price: config.public_sale_price,
            start_time: config.start_time,
            end_time: config.end_time,
            token_release_time: config.token_release_time,
            unlock_time: config.unlock_time,
            min_subscription: config.min_subscription,
            max_subscription: config.max_subscription,
            target_raised: config.target_raised,
            current_raised: state.current_raised,
            enabled: state.enabled,
            burn_rest_token: config.burn_rest_token,
            liquidated_damage_proportion: config.liquidated_damage_proportion,
            additional_info,
        }
    }
}

impl ProjectConfig {
    /// `true` while `start_time <= now <= end_time`.
    pub fn in_sale_window(&self, now: u64) -> bool {
        now >= self.start_time && now <= self.end_time
    }
}

/// Per-project release schedule.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    pub total_period: u32,
    pub period_duration: u64,
    pub first_distribute_proportion: u32,
    pub rest_distribute_proportion: u32,
    /// Number of periods released so far; only ever incremented by one.
    pub latest_period: u32,
    /// Set once by `withdraw`.
    pub withdrawn: bool,
}

/// Compound key for everything held per (project, investor).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct InvestorKey {
    pub project_id: BytesN<32>,
    pub investor: Address,
}

/// Accepted-asset amount an investor currently has committed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentPosition {
    pub token: Address,
    pub amount: i128,
    pub exited: bool,
}

/// Project tokens owed to an investor, per vesting period.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entitlement {
    pub token: Address,
    /// `position * presale_price / MANTISSA`.
    pub total: i128,
    /// Period number (1-based) → amount owed for that period.
    pub amounts: Map<u32, i128>,
    pub last_claimed: u32,
}

/// Penalties withheld from one investor's early exits on one project.
///
/// Repeated exits by the same investor add to `amount`; the entry is paid
/// out once, after cancellation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyEntry {
    pub investor: Address,
    pub amount: i128,
    pub token: Address,
    pub claimed: bool,
}

/// Per-project penalty header. Entries live under their own keys; `count`
/// investors are indexed `0..count` in recording order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyLedger {
    pub count: u32,
    pub total: i128,
    /// Next index the bulk payout will visit.
    pub cursor: u32,
}

/// One realized vesting payout, kept for audit queries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimRecord {
    pub project_id: BytesN<32>,
    pub period: u32,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidatedDamageConfig {
    pub default_proportion: u32,
}
