//! Client side of the external whitelist service.
//!
//! The launchpad never stores membership itself. It links each project to a
//! whitelist id and asks the collaborator contract at invest time.

use soroban_sdk::{contractclient, panic_with_error, Address, BytesN, Env, String, Vec};

use crate::storage;
use crate::Error;

#[allow(dead_code)]
#[contractclient(name = "WhitelistClient")]
pub trait WhitelistInterface {
    /// Create a whitelist owned by `creator`, managed by `managers`.
    fn create_whitelist(
        env: Env,
        creator: Address,
        project_id: BytesN<32>,
        managers: Vec<Address>,
        url: String,
    ) -> BytesN<32>;

    fn is_available(env: Env, whitelist_id: BytesN<32>) -> bool;

    fn is_member(env: Env, whitelist_id: BytesN<32>, member: Address) -> bool;

    fn add_members(env: Env, manager: Address, whitelist_id: BytesN<32>, members: Vec<Address>);

    fn remove_members(env: Env, manager: Address, whitelist_id: BytesN<32>, members: Vec<Address>);

    fn disable(env: Env, manager: Address, whitelist_id: BytesN<32>);
}

pub fn client(env: &Env) -> WhitelistClient<'_> {
    let address = storage::get_whitelist_contract(env)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized));
    WhitelistClient::new(env, &address)
}

/// Create a whitelist for a new project, managed by the creator and by this
/// contract. Disabled straight away unless `enabled`.
pub fn create_for_project(
    env: &Env,
    project_id: &BytesN<32>,
    creator: &Address,
    url: &String,
    enabled: bool,
) -> BytesN<32> {
    let this = env.current_contract_address();
    let wl = client(env);
    let mut managers = Vec::new(env);
    managers.push_back(creator.clone());
    managers.push_back(this.clone());
    let whitelist_id = wl.create_whitelist(&this, project_id, &managers, url);
    if !enabled {
        wl.disable(&this, &whitelist_id);
    }
    whitelist_id
}

/// `true` when `investor` may invest: either no active whitelist is linked
/// or the investor is a member of it.
pub fn admits(env: &Env, whitelist_id: Option<BytesN<32>>, investor: &Address) -> bool {
    let Some(whitelist_id) = whitelist_id else {
        return true;
    };
    let wl = client(env);
    if !wl.is_available(&whitelist_id) {
        return true;
    }
    wl.is_member(&whitelist_id, investor)
}

/// Return the project's whitelist id if it is currently available.
pub fn require_available(env: &Env, project_id: &BytesN<32>) -> BytesN<32> {
    let whitelist_id = storage::get_whitelist_id(env, project_id)
        .unwrap_or_else(|| panic_with_error!(env, Error::WhitelistNotAvailable));
    if !client(env).is_available(&whitelist_id) {
        panic_with_error!(env, Error::WhitelistNotAvailable);
    }
    whitelist_id
}
