//! # Launchpad Protocol Contract
//!
//! A project creator escrows a fixed supply of a project token; investors
//! commit an accepted token during a sale window; afterwards the raised
//! principal goes to the creator and the sold tokens vest to investors over
//! discrete periods. Investors leaving early pay a liquidated damage.
//!
//! | Phase        | Entry Point(s)                                                 |
//! |--------------|----------------------------------------------------------------|
//! | Bootstrap    | [`LaunchpadProtocol::init`]                                    |
//! | Role admin   | `grant_role`, `revoke_role`, `transfer_super_admin`            |
//! | Config       | `set_whitelist_contract`, `set_liquidated_damage_config`       |
//! | Registration | `register`, `cancel`, `update_additional_info`                 |
//! | Whitelists   | `add_whitelists`, `remove_whitelists`                          |
//! | Sale         | `invest`, `disinvest`                                          |
//! | Vesting      | `next_period`, `claim`                                         |
//! | Settlement   | `withdraw`, `refund`, `refund_all`                             |
//! | Penalties    | `claim_liquidated_damage`, `claim_liquidated_damage_all`       |
//! | Queries      | `get_project`, `get_liquidated_damages`, `get_claim_history`    |
//!
//! ## Architecture
//!
//! Authorization lives in [`rbac`], storage in [`storage`], custody in
//! [`escrow`], schedule arithmetic in [`vesting`] and the whitelist
//! collaborator in [`whitelist`]. This file holds the entry points, their
//! guards, and event emission.
//!
//! Every failure panics with an [`Error`]; the host discards all writes of
//! the failed invocation, token transfers included.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, Address, BytesN, Env, Map, String,
    Vec,
};

pub mod escrow;
pub mod events;
pub mod rbac;
mod storage;
mod types;
pub mod vesting;
pub mod whitelist;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod rbac_test;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_whitelist;

pub use rbac::Role;
pub use types::{
    ClaimRecord, Entitlement, InvestmentPosition, InvestorKey, LiquidatedDamageConfig,
    PenaltyEntry, PenaltyLedger, Project, ProjectConfig, ProjectState, RegisterParams,
    VestingSchedule, DEFAULT_LIQUIDATED_DAMAGE_PROPORTION, MANTISSA, MAX_BATCH_SIZE, MAX_PERIOD,
    PROPORTION_SCALE,
};

/// Failure codes, grouped by kind:
/// authorization `1..=9`, validation `10..=29`, state `30..=49`,
/// timing `50..=59`, arithmetic `60..`.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 1,
    NotWhitelisted = 2,

    InvalidSubscription = 10,
    InvalidTimeWindow = 11,
    InvalidReleaseTime = 12,
    InvalidUnlockTime = 13,
    InvalidPeriod = 14,
    InvalidDistribution = 15,
    InvalidTargetRaised = 16,
    InvalidProportion = 17,
    InvalidAmount = 18,
    InvalidToken = 19,
    BatchTooLarge = 20,
    SubscriptionOutOfRange = 21,

    AlreadyInitialized = 30,
    NotInitialized = 31,
    ProjectNotFound = 32,
    ProjectAlreadyExists = 33,
    ProjectNotEnabled = 34,
    ProjectStillEnabled = 35,
    QuotaExceeded = 36,
    NoInvestRecord = 37,
    AlreadyDisinvested = 38,
    AlreadyClaimed = 39,
    AlreadyWithdrawn = 40,
    PeriodsExhausted = 41,
    NoPenaltyRecord = 42,
    InsufficientEscrow = 43,
    WhitelistNotAvailable = 44,

    SaleNotOpen = 50,
    SaleEnded = 51,
    ReleaseNotReached = 52,
    PeriodNotReady = 53,

    ZeroPrice = 60,
    Overflow = 61,
}

/// Abort the invocation with the arithmetic error carried by `result`.
fn raise<T>(env: &Env, result: Result<T, Error>) -> T {
    result.unwrap_or_else(|err| panic_with_error!(env, err))
}

#[contract]
pub struct LaunchpadProtocol;

#[contractimpl]
impl LaunchpadProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation and configuration
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract.
    ///
    /// Must be called exactly once after deployment. Installs `super_admin`,
    /// the whitelist collaborator, and the 10% liquidated-damage default.
    pub fn init(env: Env, super_admin: Address, whitelist_contract: Address) {
        super_admin.require_auth();
        rbac::init_super_admin(&env, &super_admin);
        storage::set_whitelist_contract(&env, &whitelist_contract);
        storage::set_ld_config(
            &env,
            &LiquidatedDamageConfig {
                default_proportion: DEFAULT_LIQUIDATED_DAMAGE_PROPORTION,
            },
        );
    }

    /// Grant `role` to `target`. Only the SuperAdmin may grant `SuperAdmin`.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) {
        caller.require_auth();
        rbac::grant_role(&env, &caller, &target, role);
    }

    pub fn revoke_role(env: Env, caller: Address, target: Address) {
        caller.require_auth();
        rbac::revoke_role(&env, &caller, &target);
    }

    pub fn transfer_super_admin(env: Env, current_super_admin: Address, new_super_admin: Address) {
        current_super_admin.require_auth();
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin);
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::get_role(&env, &address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, &address, role)
    }

    /// Point the contract at a different whitelist collaborator.
    pub fn set_whitelist_contract(env: Env, caller: Address, whitelist_contract: Address) {
        caller.require_auth();
        rbac::require_admin(&env, &caller);
        storage::set_whitelist_contract(&env, &whitelist_contract);
    }

    pub fn get_whitelist_contract(env: Env) -> Option<Address> {
        storage::get_whitelist_contract(&env)
    }

    /// Replace the global liquidated-damage proportion used by projects
    /// registered without an override.
    pub fn set_liquidated_damage_config(env: Env, caller: Address, default_proportion: u32) {
        caller.require_auth();
        rbac::require_admin(&env, &caller);
        if default_proportion > PROPORTION_SCALE {
            panic_with_error!(&env, Error::InvalidProportion);
        }
        storage::set_ld_config(&env, &LiquidatedDamageConfig { default_proportion });
    }

    pub fn get_liquidated_damage_config(env: Env) -> LiquidatedDamageConfig {
        storage::get_ld_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Project registry
    // ─────────────────────────────────────────────────────────

    /// Register a sale and escrow `issue_amount` of the project token.
    ///
    /// Links `params.whitelist_id` when given, otherwise creates a whitelist
    /// through the collaborator.
    pub fn register(env: Env, creator: Address, params: RegisterParams) -> Project {
        creator.require_auth();
        let now = env.ledger().timestamp();
        let target_raised = Self::validate_registration(&env, &params, now);

        let id = escrow::derive_project_id(&env, &params, &creator);
        if storage::has_project(&env, &id) {
            panic_with_error!(&env, Error::ProjectAlreadyExists);
        }

        let nonce = storage::take_creator_nonce(&env, &creator);
        let escrow_id = escrow::derive_escrow_id(&env, &creator, nonce);
        escrow::transfer_in(
            &env,
            &escrow_id,
            &creator,
            &params.project_token,
            params.issue_amount,
        );

        let config = ProjectConfig {
            id: id.clone(),
            creator: creator.clone(),
            escrow: escrow_id,
            accepted_token: params.accepted_token.clone(),
            project_token: params.project_token.clone(),
            crowdfunding_type: params.crowdfunding_type.clone(),
            issue_amount: params.issue_amount,
            presale_price: params.presale_price,
            public_sale_price: params.public_sale_price,
            start_time: params.start_time,
            end_time: params.end_time,
            token_release_time: params.token_release_time,
            unlock_time: params.unlock_time,
            min_subscription: params.min_subscription,
            max_subscription: params.max_subscription,
            target_raised,
            burn_rest_token: params.burn_rest_token,
            liquidated_damage_proportion: params.liquidated_damage_proportion,
        };
        let state = ProjectState {
            enabled: true,
            current_raised: 0,
        };
        let schedule = VestingSchedule {
            total_period: params.total_period,
            period_duration: params.period_duration,
            first_distribute_proportion: params.first_distribute_proportion,
            rest_distribute_proportion: params.rest_distribute_proportion,
            latest_period: 0,
            withdrawn: false,
        };
        storage::save_new_project(&env, &config, &state, &schedule, &params.additional_info);

        let whitelist_id = match params.whitelist_id.clone() {
            Some(existing) => existing,
            None => whitelist::create_for_project(
                &env,
                &id,
                &creator,
                &params.whitelist_url,
                params.enable_whitelist,
            ),
        };
        storage::set_whitelist_id(&env, &id, &whitelist_id);
        events::emit_whitelist_linked(&env, &id, &whitelist_id);

        let project = Project::from_parts(config, state, params.additional_info);
        events::emit_project_registered(&env, &project);
        project
    }

    /// Cancel a sale before it ends and settle the whole issue amount.
    /// Rejected once the first period has been released.
    ///
    /// The project token is burned when `burn_rest_token` is set, otherwise
    /// returned to the creator. Investors then use `refund`.
    pub fn cancel(env: Env, creator: Address, project_id: BytesN<32>) {
        creator.require_auth();
        let (config, mut state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);
        Self::require_creator(&env, &config, &creator);
        if env.ledger().timestamp() > config.end_time {
            panic_with_error!(&env, Error::SaleEnded);
        }
        let schedule = storage::load_schedule(&env, &project_id);
        if schedule.withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }
        if schedule.latest_period > 0 {
            panic_with_error!(&env, Error::SaleEnded);
        }

        state.enabled = false;
        storage::save_project_state(&env, &project_id, &state);

        Self::settle_project_tokens(&env, &config, config.issue_amount);
        events::emit_project_cancelled(
            &env,
            &project_id,
            config.issue_amount,
            config.burn_rest_token,
        );
    }

    pub fn update_additional_info(
        env: Env,
        creator: Address,
        project_id: BytesN<32>,
        additional_info: Map<String, String>,
    ) {
        creator.require_auth();
        let (config, state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);
        Self::require_creator(&env, &config, &creator);
        storage::save_additional_info(&env, &project_id, &additional_info);
        events::emit_additional_info_updated(&env, &project_id, additional_info);
    }

    /// Add `users` to the project's whitelist. The whitelist must be available.
    pub fn add_whitelists(env: Env, creator: Address, project_id: BytesN<32>, users: Vec<Address>) {
        creator.require_auth();
        let whitelist_id = Self::owned_whitelist(&env, &creator, &project_id, &users);
        whitelist::client(&env).add_members(
            &env.current_contract_address(),
            &whitelist_id,
            &users,
        );
    }

    pub fn remove_whitelists(
        env: Env,
        creator: Address,
        project_id: BytesN<32>,
        users: Vec<Address>,
    ) {
        creator.require_auth();
        let whitelist_id = Self::owned_whitelist(&env, &creator, &project_id, &users);
        whitelist::client(&env).remove_members(
            &env.current_contract_address(),
            &whitelist_id,
            &users,
        );
    }

    // ─────────────────────────────────────────────────────────
    // Investment ledger
    // ─────────────────────────────────────────────────────────

    /// Commit `amount` of the accepted token.
    ///
    /// The investor's cumulative position must stay within
    /// `[min_subscription, max_subscription]` and the project may not raise
    /// past `target_raised`.
    pub fn invest(
        env: Env,
        investor: Address,
        project_id: BytesN<32>,
        token: Address,
        amount: i128,
    ) {
        investor.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let (config, mut state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);
        let schedule = storage::load_schedule(&env, &project_id);
        Self::require_sale_open(&env, &config, &schedule);

        if !whitelist::admits(&env, storage::get_whitelist_id(&env, &project_id), &investor) {
            panic_with_error!(&env, Error::NotWhitelisted);
        }
        if token != config.accepted_token {
            panic_with_error!(&env, Error::InvalidToken);
        }

        let key = storage::investor_key(&project_id, &investor);
        let mut position = storage::get_position(&env, &key).unwrap_or(InvestmentPosition {
            token: token.clone(),
            amount: 0,
            exited: false,
        });
        let total = position
            .amount
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        if total < config.min_subscription || total > config.max_subscription {
            panic_with_error!(&env, Error::SubscriptionOutOfRange);
        }

        escrow::transfer_in(&env, &config.escrow, &investor, &token, amount);

        position.amount = total;
        position.exited = false;
        storage::save_position(&env, &key, &position);

        state.current_raised = state
            .current_raised
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        if state.current_raised > config.target_raised {
            panic_with_error!(&env, Error::QuotaExceeded);
        }
        storage::save_project_state(&env, &project_id, &state);

        let entitlement = raise(
            &env,
            vesting::update_entitlement(
                &env,
                &key,
                &config.project_token,
                total,
                config.presale_price,
                &schedule,
            ),
        );

        events::emit_invested(
            &env,
            events::Invested {
                project_id,
                investor,
                token,
                amount,
                total_amount: total,
                project_token: config.project_token,
                to_claim_amount: entitlement.total,
            },
        );
    }

    /// Leave the sale early. The liquidated damage is withheld and recorded;
    /// the rest of the position is returned.
    pub fn disinvest(env: Env, investor: Address, project_id: BytesN<32>) {
        investor.require_auth();
        let (config, mut state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);
        let schedule = storage::load_schedule(&env, &project_id);
        Self::require_sale_open(&env, &config, &schedule);

        let key = storage::investor_key(&project_id, &investor);
        let mut position = storage::get_position(&env, &key)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NoInvestRecord));
        if position.exited {
            panic_with_error!(&env, Error::AlreadyDisinvested);
        }
        if position.amount <= 0 {
            panic_with_error!(&env, Error::NoInvestRecord);
        }

        let proportion = config
            .liquidated_damage_proportion
            .unwrap_or_else(|| storage::get_ld_config(&env).default_proportion);
        let committed = position.amount;
        let penalty = raise(&env, vesting::apply_proportion(committed, proportion));
        let returned = committed - penalty;
        escrow::transfer_out(&env, &config.escrow, &investor, &position.token, returned);

        position.amount = 0;
        position.exited = true;
        storage::save_position(&env, &key, &position);

        state.current_raised -= committed;
        storage::save_project_state(&env, &project_id, &state);

        raise(
            &env,
            vesting::update_entitlement(
                &env,
                &key,
                &config.project_token,
                0,
                config.presale_price,
                &schedule,
            ),
        );

        Self::record_penalty(&env, &key, &position.token, penalty);

        events::emit_disinvested(
            &env,
            events::Disinvested {
                project_id: project_id.clone(),
                investor: investor.clone(),
                token: position.token.clone(),
                total_amount: committed,
                returned_amount: returned,
            },
        );
        events::emit_liquidated_damage_recorded(
            &env,
            events::LiquidatedDamageRecorded {
                project_id,
                investor,
                token: position.token,
                amount: penalty,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Vesting
    // ─────────────────────────────────────────────────────────

    /// Release the next vesting period. Periods are never skipped.
    pub fn next_period(env: Env, caller: Address, project_id: BytesN<32>) {
        caller.require_auth();
        rbac::require_admin(&env, &caller);
        let (config, state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);

        let mut schedule = storage::load_schedule(&env, &project_id);
        if schedule.latest_period >= schedule.total_period {
            panic_with_error!(&env, Error::PeriodsExhausted);
        }
        let ready_at = raise(
            &env,
            vesting::next_release_at(config.token_release_time, &schedule),
        );
        if env.ledger().timestamp() < ready_at {
            panic_with_error!(&env, Error::PeriodNotReady);
        }

        schedule.latest_period += 1;
        storage::save_schedule(&env, &project_id, &schedule);
        events::emit_period_advanced(&env, &project_id, schedule.latest_period);
    }

    /// Pay `investor` every released period not yet claimed.
    ///
    /// Zero-amount periods still advance the cursor and are still recorded.
    /// A repeat call before the next `next_period` pays nothing.
    pub fn claim(env: Env, project_id: BytesN<32>, investor: Address) {
        let (config, state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);
        let schedule = storage::load_schedule(&env, &project_id);

        let key = storage::investor_key(&project_id, &investor);
        let mut entitlement = storage::get_entitlement(&env, &key)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NoInvestRecord));
        if entitlement.amounts.is_empty() {
            panic_with_error!(&env, Error::NoInvestRecord);
        }
        if entitlement.last_claimed >= schedule.latest_period {
            return;
        }

        for period in (entitlement.last_claimed + 1)..=schedule.latest_period {
            let amount = entitlement.amounts.get(period).unwrap_or(0);
            escrow::transfer_out(&env, &config.escrow, &investor, &entitlement.token, amount);
            storage::push_claim_record(
                &env,
                &investor,
                &ClaimRecord {
                    project_id: project_id.clone(),
                    period,
                    token: entitlement.token.clone(),
                    amount,
                },
            );
            events::emit_claimed(
                &env,
                events::Claimed {
                    project_id: project_id.clone(),
                    investor: investor.clone(),
                    period,
                    latest_period: schedule.latest_period,
                    token: entitlement.token.clone(),
                    amount,
                },
            );
        }

        entitlement.last_claimed = schedule.latest_period;
        storage::save_entitlement(&env, &key, &entitlement);
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Pay the raised principal plus recorded penalties to the creator and
    /// settle the unsold project tokens. One-shot.
    pub fn withdraw(env: Env, caller: Address, project_id: BytesN<32>) {
        caller.require_auth();
        rbac::require_admin(&env, &caller);
        let (config, state) = storage::load_project_pair(&env, &project_id);
        Self::require_enabled(&env, &state);

        let mut schedule = storage::load_schedule(&env, &project_id);
        if schedule.withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }
        if env.ledger().timestamp() < config.token_release_time {
            panic_with_error!(&env, Error::ReleaseNotReached);
        }

        let raised = state.current_raised;
        escrow::transfer_out(
            &env,
            &config.escrow,
            &config.creator,
            &config.accepted_token,
            raised,
        );
        let penalties = storage::get_penalties(&env, &project_id).total;
        escrow::transfer_out(
            &env,
            &config.escrow,
            &config.creator,
            &config.accepted_token,
            penalties,
        );

        schedule.withdrawn = true;
        storage::save_schedule(&env, &project_id, &schedule);

        let sold = raise(&env, vesting::token_value(raised, config.presale_price));
        let rest = config.issue_amount - sold;
        Self::settle_project_tokens(&env, &config, rest);

        events::emit_withdrawn(
            &env,
            events::Withdrawn {
                project_id,
                accepted_token: config.accepted_token,
                withdraw_amount: raised,
                liquidated_damage_amount: penalties,
                project_token: config.project_token,
                burn_rest_token: config.burn_rest_token,
                rest_amount: rest,
            },
        );
    }

    /// Return the caller's whole position from a cancelled project.
    pub fn refund(env: Env, investor: Address, project_id: BytesN<32>) {
        investor.require_auth();
        let (config, mut state) = storage::load_project_pair(&env, &project_id);
        Self::require_disabled(&env, &state);
        let schedule = storage::load_schedule(&env, &project_id);

        if !Self::refund_position(&env, &config, &mut state, &schedule, &investor) {
            panic_with_error!(&env, Error::NoInvestRecord);
        }
        storage::save_project_state(&env, &project_id, &state);
    }

    /// Refund every listed investor holding a live position; others are
    /// skipped. Lists longer than [`MAX_BATCH_SIZE`] must be split by the caller.
    pub fn refund_all(env: Env, caller: Address, project_id: BytesN<32>, investors: Vec<Address>) {
        caller.require_auth();
        rbac::require_admin(&env, &caller);
        if investors.len() > MAX_BATCH_SIZE {
            panic_with_error!(&env, Error::BatchTooLarge);
        }
        let (config, mut state) = storage::load_project_pair(&env, &project_id);
        Self::require_disabled(&env, &state);
        let schedule = storage::load_schedule(&env, &project_id);

        for investor in investors.iter() {
            Self::refund_position(&env, &config, &mut state, &schedule, &investor);
        }
        storage::save_project_state(&env, &project_id, &state);
    }

    // ─────────────────────────────────────────────────────────
    // Liquidated damages
    // ─────────────────────────────────────────────────────────

    /// Pay back the caller's own recorded penalties from a cancelled project.
    pub fn claim_liquidated_damage(env: Env, investor: Address, project_id: BytesN<32>) {
        investor.require_auth();
        let (config, state) = storage::load_project_pair(&env, &project_id);
        Self::require_disabled(&env, &state);

        let key = storage::investor_key(&project_id, &investor);
        let entry = storage::get_penalty(&env, &key)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NoPenaltyRecord));
        if entry.claimed {
            panic_with_error!(&env, Error::AlreadyClaimed);
        }
        let entry = Self::pay_penalty(&env, &config, entry);
        storage::save_penalty(&env, &key, &entry);
    }

    /// Walk up to [`MAX_BATCH_SIZE`] penalty entries of a cancelled project
    /// from the bulk cursor and pay the unclaimed ones. Repeat the call to
    /// page through longer ledgers.
    pub fn claim_liquidated_damage_all(env: Env, caller: Address, project_id: BytesN<32>) {
        caller.require_auth();
        rbac::require_admin(&env, &caller);
        let (config, state) = storage::load_project_pair(&env, &project_id);
        Self::require_disabled(&env, &state);

        let mut ledger = storage::get_penalties(&env, &project_id);
        if ledger.count == 0 {
            panic_with_error!(&env, Error::NoPenaltyRecord);
        }
        let end = ledger.count.min(ledger.cursor.saturating_add(MAX_BATCH_SIZE));
        let mut paid = 0u32;
        for index in ledger.cursor..end {
            let Some(investor) = storage::get_penalty_slot(&env, &project_id, index) else {
                continue;
            };
            let key = storage::investor_key(&project_id, &investor);
            let Some(entry) = storage::get_penalty(&env, &key) else {
                continue;
            };
            if entry.claimed {
                continue;
            }
            let entry = Self::pay_penalty(&env, &config, entry);
            storage::save_penalty(&env, &key, &entry);
            paid += 1;
        }

        if paid == 0 && end == ledger.count {
            panic_with_error!(&env, Error::AlreadyClaimed);
        }
        ledger.cursor = end;
        storage::save_penalties(&env, &project_id, &ledger);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project(env: Env, project_id: BytesN<32>) -> Project {
        storage::load_project(&env, &project_id)
    }

    pub fn get_vesting_schedule(env: Env, project_id: BytesN<32>) -> VestingSchedule {
        storage::load_schedule(&env, &project_id)
    }

    pub fn get_position(
        env: Env,
        project_id: BytesN<32>,
        investor: Address,
    ) -> Option<InvestmentPosition> {
        storage::load_project_config(&env, &project_id);
        storage::get_position(&env, &storage::investor_key(&project_id, &investor))
    }

    pub fn get_entitlement(
        env: Env,
        project_id: BytesN<32>,
        investor: Address,
    ) -> Option<Entitlement> {
        storage::load_project_config(&env, &project_id);
        storage::get_entitlement(&env, &storage::investor_key(&project_id, &investor))
    }

    /// Penalty header: entry count, running total and bulk cursor.
    pub fn get_liquidated_damages(env: Env, project_id: BytesN<32>) -> PenaltyLedger {
        storage::load_project_config(&env, &project_id);
        storage::get_penalties(&env, &project_id)
    }

    pub fn get_liquidated_damage(
        env: Env,
        project_id: BytesN<32>,
        investor: Address,
    ) -> Option<PenaltyEntry> {
        storage::load_project_config(&env, &project_id);
        storage::get_penalty(&env, &storage::investor_key(&project_id, &investor))
    }

    /// Up to `limit` penalty entries in recording order, starting at `start`.
    pub fn get_liquidated_damage_entries(
        env: Env,
        project_id: BytesN<32>,
        start: u32,
        limit: u32,
    ) -> Vec<PenaltyEntry> {
        if limit > MAX_BATCH_SIZE {
            panic_with_error!(&env, Error::BatchTooLarge);
        }
        storage::load_project_config(&env, &project_id);
        let count = storage::get_penalties(&env, &project_id).count;
        let mut entries = Vec::new(&env);
        for index in start..count.min(start.saturating_add(limit)) {
            let entry = storage::get_penalty_slot(&env, &project_id, index).and_then(|investor| {
                storage::get_penalty(&env, &storage::investor_key(&project_id, &investor))
            });
            if let Some(entry) = entry {
                entries.push_back(entry);
            }
        }
        entries
    }

    pub fn get_claim_count(env: Env, investor: Address) -> u32 {
        storage::get_claim_count(&env, &investor)
    }

    /// Up to `limit` payout records of `investor`, oldest first, from `start`.
    pub fn get_claim_history(
        env: Env,
        investor: Address,
        start: u32,
        limit: u32,
    ) -> Vec<ClaimRecord> {
        if limit > MAX_BATCH_SIZE {
            panic_with_error!(&env, Error::BatchTooLarge);
        }
        let count = storage::get_claim_count(&env, &investor);
        let mut records = Vec::new(&env);
        for index in start..count.min(start.saturating_add(limit)) {
            if let Some(record) = storage::get_claim_record(&env, &investor, index) {
                records.push_back(record);
            }
        }
        records
    }

    pub fn get_whitelist_id(env: Env, project_id: BytesN<32>) -> Option<BytesN<32>> {
        storage::get_whitelist_id(&env, &project_id)
    }

    pub fn get_escrow_id(env: Env, project_id: BytesN<32>) -> BytesN<32> {
        storage::load_project_config(&env, &project_id).escrow
    }

    /// Escrow id the creator's next registration will receive.
    pub fn get_pending_escrow_id(env: Env, creator: Address) -> BytesN<32> {
        let nonce = storage::get_creator_nonce(&env, &creator);
        escrow::derive_escrow_id(&env, &creator, nonce)
    }

    pub fn get_escrow_balance(env: Env, project_id: BytesN<32>, token: Address) -> i128 {
        let config = storage::load_project_config(&env, &project_id);
        storage::get_escrow_balance(&env, &config.escrow, &token)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    /// Check every registration rule and return the computed target.
    fn validate_registration(env: &Env, params: &RegisterParams, now: u64) -> i128 {
        if params.issue_amount <= 0 || params.presale_price < 0 {
            panic_with_error!(env, Error::InvalidAmount);
        }
        if params.accepted_token == params.project_token {
            panic_with_error!(env, Error::InvalidToken);
        }
        if params.min_subscription <= 0 || params.max_subscription < params.min_subscription {
            panic_with_error!(env, Error::InvalidSubscription);
        }
        if params.start_time <= now || params.start_time > params.end_time {
            panic_with_error!(env, Error::InvalidTimeWindow);
        }
        if params.token_release_time < params.end_time {
            panic_with_error!(env, Error::InvalidReleaseTime);
        }
        if params.unlock_time < params.end_time {
            panic_with_error!(env, Error::InvalidUnlockTime);
        }
        if params.total_period == 0 || params.total_period > MAX_PERIOD {
            panic_with_error!(env, Error::InvalidPeriod);
        }
        if !vesting::distribution_fits(
            params.total_period,
            params.first_distribute_proportion,
            params.rest_distribute_proportion,
        ) {
            panic_with_error!(env, Error::InvalidDistribution);
        }
        if let Some(proportion) = params.liquidated_damage_proportion {
            if proportion > PROPORTION_SCALE {
                panic_with_error!(env, Error::InvalidProportion);
            }
        }

        let target = raise(
            env,
            vesting::target_raised(params.issue_amount, params.presale_price),
        );
        if target <= 0 || target < params.min_subscription {
            panic_with_error!(env, Error::InvalidTargetRaised);
        }
        target
    }

    fn require_enabled(env: &Env, state: &ProjectState) {
        if !state.enabled {
            panic_with_error!(env, Error::ProjectNotEnabled);
        }
    }

    fn require_disabled(env: &Env, state: &ProjectState) {
        if state.enabled {
            panic_with_error!(env, Error::ProjectStillEnabled);
        }
    }

    fn require_creator(env: &Env, config: &ProjectConfig, caller: &Address) {
        if &config.creator != caller {
            panic_with_error!(env, Error::NotAuthorized);
        }
    }

    /// Invest and disinvest are allowed inside `[start, end]` only while
    /// nothing has been released or withdrawn yet.
    fn require_sale_open(env: &Env, config: &ProjectConfig, schedule: &VestingSchedule) {
        if schedule.withdrawn {
            panic_with_error!(env, Error::AlreadyWithdrawn);
        }
        if !config.in_sale_window(env.ledger().timestamp()) || schedule.latest_period > 0 {
            panic_with_error!(env, Error::SaleNotOpen);
        }
    }

    fn owned_whitelist(
        env: &Env,
        creator: &Address,
        project_id: &BytesN<32>,
        users: &Vec<Address>,
    ) -> BytesN<32> {
        if users.len() > MAX_BATCH_SIZE {
            panic_with_error!(env, Error::BatchTooLarge);
        }
        let (config, state) = storage::load_project_pair(env, project_id);
        Self::require_enabled(env, &state);
        Self::require_creator(env, &config, creator);
        whitelist::require_available(env, project_id)
    }

    /// Burn or return `amount` of the project token per the project's policy.
    fn settle_project_tokens(env: &Env, config: &ProjectConfig, amount: i128) {
        if config.burn_rest_token {
            escrow::burn(env, &config.escrow, &config.project_token, amount);
        } else {
            escrow::transfer_out(
                env,
                &config.escrow,
                &config.creator,
                &config.project_token,
                amount,
            );
        }
    }

    /// Refund one live position in full. Returns `false` when there is none.
    fn refund_position(
        env: &Env,
        config: &ProjectConfig,
        state: &mut ProjectState,
        schedule: &VestingSchedule,
        investor: &Address,
    ) -> bool {
        let key = storage::investor_key(&config.id, investor);
        let Some(mut position) = storage::get_position(env, &key) else {
            return false;
        };
        if position.exited || position.amount <= 0 {
            return false;
        }

        let amount = position.amount;
        escrow::transfer_out(env, &config.escrow, investor, &position.token, amount);
        position.amount = 0;
        position.exited = true;
        storage::save_position(env, &key, &position);
        state.current_raised -= amount;

        raise(
            env,
            vesting::update_entitlement(
                env,
                &key,
                &config.project_token,
                0,
                config.presale_price,
                schedule,
            ),
        );

        events::emit_refunded(
            env,
            events::Refunded {
                project_id: config.id.clone(),
                investor: investor.clone(),
                token: position.token,
                amount,
            },
        );
        true
    }

    /// Add `amount` to the investor's penalty entry, indexing the investor
    /// the first time.
    fn record_penalty(env: &Env, key: &InvestorKey, token: &Address, amount: i128) {
        let mut ledger = storage::get_penalties(env, &key.project_id);
        let entry = match storage::get_penalty(env, key) {
            Some(mut entry) => {
                entry.amount = entry
                    .amount
                    .checked_add(amount)
                    .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
                entry
            }
            None => {
                storage::set_penalty_slot(env, &key.project_id, ledger.count, &key.investor);
                ledger.count += 1;
                PenaltyEntry {
                    investor: key.investor.clone(),
                    amount,
                    token: token.clone(),
                    claimed: false,
                }
            }
        };
        storage::save_penalty(env, key, &entry);

        ledger.total = ledger
            .total
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
        storage::save_penalties(env, &key.project_id, &ledger);
    }

    fn pay_penalty(env: &Env, config: &ProjectConfig, mut entry: PenaltyEntry) -> PenaltyEntry {
        escrow::transfer_out(env, &config.escrow, &entry.investor, &entry.token, entry.amount);
        entry.claimed = true;
        events::emit_liquidated_damage_claimed(
            env,
            events::LiquidatedDamageClaimed {
                project_id: config.id.clone(),
                investor: entry.investor.clone(),
                token: entry.token.clone(),
                amount: entry.amount,
            },
        );
        entry
    }
}
