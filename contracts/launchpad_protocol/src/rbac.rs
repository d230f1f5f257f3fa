//! # RBAC: role-based access control
//!
//! The launchpad has two operator roles:
//!
//! ```text
//! SuperAdmin
//!     └── Admin
//! ```
//!
//! Both may run the admin-gated entry points (`next_period`, `withdraw`,
//! `refund_all`, `claim_liquidated_damage_all`, configuration setters).
//! Project-owner checks are not roles: they compare the caller with the
//! project's stored creator.
//!
//! ## Storage layout
//!
//! - `RbacKey::SuperAdmin` → `Address`: the one and only super-admin.
//! - `RbacKey::Role(addr)` → `Role`: the role held by `addr`, if any.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger |
//! |--------------------|---------|
//! | `role_set`         | Role granted or replaced |
//! | `role_del`         | Role revoked |
//!
//! ## Threat model notes
//!
//! - `Admin` cannot escalate to `SuperAdmin`.
//! - `SuperAdmin` cannot be removed via `revoke_role`; use `transfer_super_admin`.

use soroban_sdk::{contracttype, panic_with_error, symbol_short, Address, Env, Symbol};

use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Full control, including granting `SuperAdmin`.
    SuperAdmin,
    /// Runs period advancement, settlement and bulk operations.
    Admin,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Role(Address),
    SuperAdmin,
}

fn store_role(env: &Env, address: &Address, role: &Role) {
    env.storage()
        .persistent()
        .set(&RbacKey::Role(address.clone()), role);
}

fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(address.clone()));
}

pub fn get_role(env: &Env, address: &Address) -> Option<Role> {
    env.storage()
        .persistent()
        .get(&RbacKey::Role(address.clone()))
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&RbacKey::SuperAdmin)
}

/// Set the initial SuperAdmin. Panics with `AlreadyInitialized` on a second call.
pub fn init_super_admin(env: &Env, super_admin: &Address) {
    if env.storage().persistent().has(&RbacKey::SuperAdmin) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage()
        .persistent()
        .set(&RbacKey::SuperAdmin, super_admin);
    store_role(env, super_admin, &Role::SuperAdmin);
    emit_set(env, super_admin, &Role::SuperAdmin, None);
}

/// Grant `role` to `target`.
///
/// - `SuperAdmin` may only be granted by the SuperAdmin.
/// - The SuperAdmin cannot be demoted through this path.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) {
    match role {
        Role::SuperAdmin => require_super_admin(env, caller),
        Role::Admin => require_admin(env, caller),
    }

    if let Some(Role::SuperAdmin) = get_role(env, target) {
        if role != Role::SuperAdmin {
            panic_with_error!(env, Error::NotAuthorized);
        }
    }

    store_role(env, target, &role);
    emit_set(env, target, &role, Some(caller.clone()));
}

/// Revoke any role from `target`. A no-op when `target` holds none.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) {
    require_admin(env, caller);

    if get_super_admin(env).as_ref() == Some(target) {
        panic_with_error!(env, Error::NotAuthorized);
    }

    if get_role(env, target).is_some() {
        clear_role(env, target);
        emit_revoke(env, target, Some(caller.clone()));
    }
}

/// Hand the SuperAdmin role from `current` to `new`.
pub fn transfer_super_admin(env: &Env, current: &Address, new: &Address) {
    require_super_admin(env, current);

    clear_role(env, current);
    emit_revoke(env, current, Some(current.clone()));

    env.storage().persistent().set(&RbacKey::SuperAdmin, new);
    store_role(env, new, &Role::SuperAdmin);
    emit_set(env, new, &Role::SuperAdmin, Some(current.clone()));
}

// ─────────────────────────────────────────────────────────
// Access guards
// ─────────────────────────────────────────────────────────

pub fn require_super_admin(env: &Env, address: &Address) {
    match get_role(env, address) {
        Some(Role::SuperAdmin) => {}
        _ => panic_with_error!(env, Error::NotAuthorized),
    }
}

/// SuperAdmin or Admin.
pub fn require_admin(env: &Env, address: &Address) {
    if get_role(env, address).is_none() {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

pub fn has_role(env: &Env, address: &Address, role: Role) -> bool {
    get_role(env, address).map(|r| r == role).unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────

/// Topic: `(role_set, target, role_symbol)`, data: `Option<caller>`.
fn emit_set(env: &Env, target: &Address, role: &Role, by: Option<Address>) {
    env.events().publish(
        (symbol_short!("role_set"), target.clone(), role_symbol(role)),
        by,
    );
}

fn emit_revoke(env: &Env, target: &Address, by: Option<Address>) {
    env.events()
        .publish((symbol_short!("role_del"), target.clone()), by);
}

fn role_symbol(role: &Role) -> Symbol {
    match role {
        Role::SuperAdmin => symbol_short!("supadmin"),
        Role::Admin => symbol_short!("admin"),
    }
}
