//! # Escrow
//!
//! Every project owns a deterministic escrow sub-account. Tokens physically
//! sit at the contract address; the per-escrow balance is tracked in storage
//! so one project can never spend another project's funds.
//!
//! The escrow id is a pure function of
//! `(contract address, creator, creator nonce)`. Nothing is allocated, so
//! `get_pending_escrow_id` can predict the id before registration.

use soroban_sdk::{panic_with_error, token, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::storage;
use crate::types::RegisterParams;
use crate::Error;

/// `sha256(contract_xdr || creator_xdr || nonce_be)`.
pub fn derive_escrow_id(env: &Env, creator: &Address, nonce: u32) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.append(&env.current_contract_address().to_xdr(env));
    data.append(&creator.clone().to_xdr(env));
    data.extend_from_array(&nonce.to_be_bytes());
    env.crypto().sha256(&data).to_bytes()
}

/// `sha256(params_xdr || creator_xdr)`. Identical input from the same
/// creator always maps to the same id, which is how duplicates are caught.
pub fn derive_project_id(env: &Env, params: &RegisterParams, creator: &Address) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.append(&params.clone().to_xdr(env));
    data.append(&creator.clone().to_xdr(env));
    env.crypto().sha256(&data).to_bytes()
}

fn credit(env: &Env, escrow: &BytesN<32>, token: &Address, amount: i128) {
    let balance = storage::get_escrow_balance(env, escrow, token)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    storage::set_escrow_balance(env, escrow, token, balance);
}

fn debit(env: &Env, escrow: &BytesN<32>, token: &Address, amount: i128) {
    let balance = storage::get_escrow_balance(env, escrow, token);
    if balance < amount {
        panic_with_error!(env, Error::InsufficientEscrow);
    }
    storage::set_escrow_balance(env, escrow, token, balance - amount);
}

/// Pull `amount` of `token` from `from` into the escrow.
pub fn transfer_in(env: &Env, escrow: &BytesN<32>, from: &Address, token: &Address, amount: i128) {
    token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
    credit(env, escrow, token, amount);
}

/// Pay `amount` of `token` out of the escrow. Zero amounts are a no-op.
pub fn transfer_out(env: &Env, escrow: &BytesN<32>, to: &Address, token: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    debit(env, escrow, token, amount);
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
}

/// Destroy `amount` of `token` held by the escrow. Zero amounts are a no-op.
pub fn burn(env: &Env, escrow: &BytesN<32>, token: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    debit(env, escrow, token, amount);
    token::Client::new(env, token).burn(&env.current_contract_address(), &amount);
}
