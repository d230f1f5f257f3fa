//! Notifications for indexers. Every topic is `(name, project_id)`.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Map, String};

use crate::types::Project;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistLinked {
    pub project_id: BytesN<32>,
    pub whitelist_id: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCancelled {
    pub project_id: BytesN<32>,
    pub settled_amount: i128,
    pub burned: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdditionalInfoUpdated {
    pub project_id: BytesN<32>,
    pub additional_info: Map<String, String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodAdvanced {
    pub project_id: BytesN<32>,
    pub new_period: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invested {
    pub project_id: BytesN<32>,
    pub investor: Address,
    pub token: Address,
    pub amount: i128,
    pub total_amount: i128,
    pub project_token: Address,
    pub to_claim_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Disinvested {
    pub project_id: BytesN<32>,
    pub investor: Address,
    pub token: Address,
    pub total_amount: i128,
    pub returned_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidatedDamageRecorded {
    pub project_id: BytesN<32>,
    pub investor: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidatedDamageClaimed {
    pub project_id: BytesN<32>,
    pub investor: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub project_id: BytesN<32>,
    pub accepted_token: Address,
    pub withdraw_amount: i128,
    pub liquidated_damage_amount: i128,
    pub project_token: Address,
    pub burn_rest_token: bool,
    pub rest_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claimed {
    pub project_id: BytesN<32>,
    pub investor: Address,
    pub period: u32,
    pub latest_period: u32,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refunded {
    pub project_id: BytesN<32>,
    pub investor: Address,
    pub token: Address,
    pub amount: i128,
}

/// Data is the full computed project.
pub fn emit_project_registered(env: &Env, project: &Project) {
    let topics = (symbol_short!("register"), project.id.clone());
    env.events().publish(topics, project.clone());
}

pub fn emit_whitelist_linked(env: &Env, project_id: &BytesN<32>, whitelist_id: &BytesN<32>) {
    let topics = (symbol_short!("wl_link"), project_id.clone());
    let data = WhitelistLinked {
        project_id: project_id.clone(),
        whitelist_id: whitelist_id.clone(),
    };
    env.events().publish(topics, data);
}

pub fn emit_project_cancelled(
    env: &Env,
    project_id: &BytesN<32>,
    settled_amount: i128,
    burned: bool,
) {
    let topics = (symbol_short!("cancel"), project_id.clone());
    let data = ProjectCancelled {
        project_id: project_id.clone(),
        settled_amount,
        burned,
    };
    env.events().publish(topics, data);
}

pub fn emit_additional_info_updated(
    env: &Env,
    project_id: &BytesN<32>,
    additional_info: Map<String, String>,
) {
    let topics = (symbol_short!("meta_upd"), project_id.clone());
    let data = AdditionalInfoUpdated {
        project_id: project_id.clone(),
        additional_info,
    };
    env.events().publish(topics, data);
}

pub fn emit_period_advanced(env: &Env, project_id: &BytesN<32>, new_period: u32) {
    let topics = (symbol_short!("period"), project_id.clone());
    let data = PeriodAdvanced {
        project_id: project_id.clone(),
        new_period,
    };
    env.events().publish(topics, data);
}

pub fn emit_invested(env: &Env, data: Invested) {
    let topics = (symbol_short!("invest"), data.project_id.clone());
    env.events().publish(topics, data);
}

pub fn emit_disinvested(env: &Env, data: Disinvested) {
    let topics = (symbol_short!("disinvest"), data.project_id.clone());
    env.events().publish(topics, data);
}

pub fn emit_liquidated_damage_recorded(env: &Env, data: LiquidatedDamageRecorded) {
    let topics = (symbol_short!("ld_rec"), data.project_id.clone());
    env.events().publish(topics, data);
}

pub fn emit_liquidated_damage_claimed(env: &Env, data: LiquidatedDamageClaimed) {
    let topics = (symbol_short!("ld_claim"), data.project_id.clone());
    env.events().publish(topics, data);
}

pub fn emit_withdrawn(env: &Env, data: Withdrawn) {
    let topics = (symbol_short!("withdraw"), data.project_id.clone());
    env.events().publish(topics, data);
}

pub fn emit_claimed(env: &Env, data: Claimed) {
    let topics = (symbol_short!("claimed"), data.project_id.clone());
    env.events().publish(topics, data);
}

pub fn emit_refunded(env: &Env, data: Refunded) {
    let topics = (symbol_short!("refund"), data.project_id.clone());
    env.events().publish(topics, data);
}
