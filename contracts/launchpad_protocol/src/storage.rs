//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the launchpad.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                  | Type                      | Description                         |
//! |----------------------|---------------------------|-------------------------------------|
//! | `WhitelistContract`  | `Address`                 | Whitelist collaborator contract     |
//! | `LdConfig`           | `LiquidatedDamageConfig`  | Global penalty default              |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type                 | Description                       |
//! |-------------------------|----------------------|-----------------------------------|
//! | `ProjConfig(id)`        | `ProjectConfig`      | Immutable project configuration   |
//! | `ProjState(id)`         | `ProjectState`       | Enabled flag and raised amount    |
//! | `ProjMeta(id)`          | `Map<String,String>` | Additional info                   |
//! | `Schedule(id)`          | `VestingSchedule`    | Period counters, withdrawn flag   |
//! | `WhitelistId(id)`       | `BytesN<32>`         | Linked whitelist                  |
//! | `Position(key)`         | `InvestmentPosition` | Per (project, investor)           |
//! | `Entitlement(key)`      | `Entitlement`        | Per (project, investor)           |
//! | `CreatorNonce(addr)`    | `u32`                | Registrations made by `addr`      |
//! | `Penalties(id)`         | `PenaltyLedger`      | Penalty count, total, bulk cursor |
//! | `Penalty(key)`          | `PenaltyEntry`       | Per (project, investor)           |
//! | `PenaltySlot(id, i)`    | `Address`            | i-th investor with a penalty      |
//! | `ClaimCount(addr)`      | `u32`                | Length of the payout log          |
//! | `ClaimLog(addr, i)`     | `ClaimRecord`        | i-th realized payout of `addr`    |
//! | `Escrow(escrow, token)` | `i128`               | Escrow sub-account balance        |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, panic_with_error, Address, BytesN, Env, Map, String};

use crate::types::{
    ClaimRecord, Entitlement, InvestmentPosition, InvestorKey, LiquidatedDamageConfig,
    PenaltyEntry, PenaltyLedger, Project, ProjectConfig, ProjectState, VestingSchedule,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Whitelist collaborator address (Instance).
    WhitelistContract,
    /// Global liquidated-damage default (Instance).
    LdConfig,
    ProjConfig(BytesN<32>),
    ProjState(BytesN<32>),
    ProjMeta(BytesN<32>),
    Schedule(BytesN<32>),
    WhitelistId(BytesN<32>),
    Position(InvestorKey),
    Entitlement(InvestorKey),
    /// Registration counter per creator, feeds escrow derivation.
    CreatorNonce(Address),
    Penalties(BytesN<32>),
    Penalty(InvestorKey),
    PenaltySlot(BytesN<32>, u32),
    ClaimCount(Address),
    ClaimLog(Address, u32),
    /// Balance of `token` held for an escrow sub-account.
    Escrow(BytesN<32>, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_whitelist_contract(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::WhitelistContract)
}

pub fn set_whitelist_contract(env: &Env, address: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::WhitelistContract, address);
    bump_instance(env);
}

/// Read the global penalty default. Panics with `NotInitialized` before `init`.
pub fn get_ld_config(env: &Env) -> LiquidatedDamageConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::LdConfig)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn set_ld_config(env: &Env, config: &LiquidatedDamageConfig) {
    env.storage().instance().set(&DataKey::LdConfig, config);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// ─────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────

pub fn has_project(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ProjConfig(id.clone()))
}

/// Persist every entry of a freshly registered project.
pub fn save_new_project(
    env: &Env,
    config: &ProjectConfig,
    state: &ProjectState,
    schedule: &VestingSchedule,
    additional_info: &Map<String, String>,
) {
    write(env, &DataKey::ProjConfig(config.id.clone()), config);
    write(env, &DataKey::ProjState(config.id.clone()), state);
    write(env, &DataKey::Schedule(config.id.clone()), schedule);
    write(env, &DataKey::ProjMeta(config.id.clone()), additional_info);
}

/// Load only the immutable configuration. Panics with `ProjectNotFound`.
pub fn load_project_config(env: &Env, id: &BytesN<32>) -> ProjectConfig {
    read(env, &DataKey::ProjConfig(id.clone()))
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound))
}

pub fn load_project_state(env: &Env, id: &BytesN<32>) -> ProjectState {
    read(env, &DataKey::ProjState(id.clone()))
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound))
}

pub fn save_project_state(env: &Env, id: &BytesN<32>, state: &ProjectState) {
    write(env, &DataKey::ProjState(id.clone()), state);
}

/// Config and state together, the pair nearly every entry point needs.
pub fn load_project_pair(env: &Env, id: &BytesN<32>) -> (ProjectConfig, ProjectState) {
    let config = load_project_config(env, id);
    let state = load_project_state(env, id);
    (config, state)
}

pub fn load_additional_info(env: &Env, id: &BytesN<32>) -> Map<String, String> {
    read(env, &DataKey::ProjMeta(id.clone())).unwrap_or_else(|| Map::new(env))
}

pub fn save_additional_info(env: &Env, id: &BytesN<32>, info: &Map<String, String>) {
    write(env, &DataKey::ProjMeta(id.clone()), info);
}

/// Reconstruct the public [`Project`] view.
pub fn load_project(env: &Env, id: &BytesN<32>) -> Project {
    let (config, state) = load_project_pair(env, id);
    let info = load_additional_info(env, id);
    Project::from_parts(config, state, info)
}

pub fn load_schedule(env: &Env, id: &BytesN<32>) -> VestingSchedule {
    read(env, &DataKey::Schedule(id.clone()))
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound))
}

pub fn save_schedule(env: &Env, id: &BytesN<32>, schedule: &VestingSchedule) {
    write(env, &DataKey::Schedule(id.clone()), schedule);
}

pub fn get_whitelist_id(env: &Env, id: &BytesN<32>) -> Option<BytesN<32>> {
    read(env, &DataKey::WhitelistId(id.clone()))
}

pub fn set_whitelist_id(env: &Env, id: &BytesN<32>, whitelist_id: &BytesN<32>) {
    write(env, &DataKey::WhitelistId(id.clone()), whitelist_id);
}

// ─────────────────────────────────────────────────────────
// Per-investor records
// ─────────────────────────────────────────────────────────

pub fn investor_key(project_id: &BytesN<32>, investor: &Address) -> InvestorKey {
    InvestorKey {
        project_id: project_id.clone(),
        investor: investor.clone(),
    }
}

pub fn get_position(env: &Env, key: &InvestorKey) -> Option<InvestmentPosition> {
    read(env, &DataKey::Position(key.clone()))
}

pub fn save_position(env: &Env, key: &InvestorKey, position: &InvestmentPosition) {
    write(env, &DataKey::Position(key.clone()), position);
}

pub fn get_entitlement(env: &Env, key: &InvestorKey) -> Option<Entitlement> {
    read(env, &DataKey::Entitlement(key.clone()))
}

pub fn save_entitlement(env: &Env, key: &InvestorKey, entitlement: &Entitlement) {
    write(env, &DataKey::Entitlement(key.clone()), entitlement);
}

pub fn get_claim_count(env: &Env, investor: &Address) -> u32 {
    read(env, &DataKey::ClaimCount(investor.clone())).unwrap_or(0)
}

pub fn get_claim_record(env: &Env, investor: &Address, index: u32) -> Option<ClaimRecord> {
    read(env, &DataKey::ClaimLog(investor.clone(), index))
}

/// Append to the investor's payout log.
pub fn push_claim_record(env: &Env, investor: &Address, record: &ClaimRecord) {
    let index = get_claim_count(env, investor);
    write(env, &DataKey::ClaimLog(investor.clone(), index), record);
    write(env, &DataKey::ClaimCount(investor.clone()), &(index + 1));
}

// ─────────────────────────────────────────────────────────
// Penalties
// ─────────────────────────────────────────────────────────

pub fn get_penalties(env: &Env, id: &BytesN<32>) -> PenaltyLedger {
    read(env, &DataKey::Penalties(id.clone())).unwrap_or(PenaltyLedger {
        count: 0,
        total: 0,
        cursor: 0,
    })
}

pub fn save_penalties(env: &Env, id: &BytesN<32>, ledger: &PenaltyLedger) {
    write(env, &DataKey::Penalties(id.clone()), ledger);
}

pub fn get_penalty(env: &Env, key: &InvestorKey) -> Option<PenaltyEntry> {
    read(env, &DataKey::Penalty(key.clone()))
}

pub fn save_penalty(env: &Env, key: &InvestorKey, entry: &PenaltyEntry) {
    write(env, &DataKey::Penalty(key.clone()), entry);
}

pub fn get_penalty_slot(env: &Env, id: &BytesN<32>, index: u32) -> Option<Address> {
    read(env, &DataKey::PenaltySlot(id.clone(), index))
}

pub fn set_penalty_slot(env: &Env, id: &BytesN<32>, index: u32, investor: &Address) {
    write(env, &DataKey::PenaltySlot(id.clone(), index), investor);
}

// ─────────────────────────────────────────────────────────
// Creator nonces
// ─────────────────────────────────────────────────────────

pub fn get_creator_nonce(env: &Env, creator: &Address) -> u32 {
    read(env, &DataKey::CreatorNonce(creator.clone())).unwrap_or(0)
}

/// Return the creator's current nonce and store its successor.
pub fn take_creator_nonce(env: &Env, creator: &Address) -> u32 {
    let current = get_creator_nonce(env, creator);
    let next = current
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    write(env, &DataKey::CreatorNonce(creator.clone()), &next);
    current
}

// ─────────────────────────────────────────────────────────
// Escrow balances
// ─────────────────────────────────────────────────────────

pub fn get_escrow_balance(env: &Env, escrow: &BytesN<32>, token: &Address) -> i128 {
    read(env, &DataKey::Escrow(escrow.clone(), token.clone())).unwrap_or(0)
}

pub fn set_escrow_balance(env: &Env, escrow: &BytesN<32>, token: &Address, balance: i128) {
    write(env, &DataKey::Escrow(escrow.clone(), token.clone()), &balance);
}
