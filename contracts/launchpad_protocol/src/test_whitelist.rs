//! In-memory whitelist service registered alongside the launchpad in tests.

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, String, Vec};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Count,
    Available(BytesN<32>),
    Member(BytesN<32>, Address),
    Url(BytesN<32>),
}

#[contract]
pub struct MockWhitelist;

#[contractimpl]
impl MockWhitelist {
    pub fn create_whitelist(
        env: Env,
        _creator: Address,
        _project_id: BytesN<32>,
        _managers: Vec<Address>,
        url: String,
    ) -> BytesN<32> {
        let id = Self::next_id(&env);
        env.storage()
            .instance()
            .set(&MockKey::Available(id.clone()), &true);
        env.storage().instance().set(&MockKey::Url(id.clone()), &url);
        id
    }

    pub fn is_available(env: Env, whitelist_id: BytesN<32>) -> bool {
        env.storage()
            .instance()
            .get(&MockKey::Available(whitelist_id))
            .unwrap_or(false)
    }

    pub fn is_member(env: Env, whitelist_id: BytesN<32>, member: Address) -> bool {
        env.storage()
            .instance()
            .get(&MockKey::Member(whitelist_id, member))
            .unwrap_or(false)
    }

    pub fn add_members(
        env: Env,
        manager: Address,
        whitelist_id: BytesN<32>,
        members: Vec<Address>,
    ) {
        manager.require_auth();
        for member in members.iter() {
            env.storage()
                .instance()
                .set(&MockKey::Member(whitelist_id.clone(), member), &true);
        }
    }

    pub fn remove_members(
        env: Env,
        manager: Address,
        whitelist_id: BytesN<32>,
        members: Vec<Address>,
    ) {
        manager.require_auth();
        for member in members.iter() {
            env.storage()
                .instance()
                .remove(&MockKey::Member(whitelist_id.clone(), member));
        }
    }

    pub fn disable(env: Env, manager: Address, whitelist_id: BytesN<32>) {
        manager.require_auth();
        env.storage()
            .instance()
            .set(&MockKey::Available(whitelist_id), &false);
    }

    // Test-only controls.

    /// A whitelist created outside the launchpad, to be linked at registration.
    pub fn create_external(env: Env) -> BytesN<32> {
        let id = Self::next_id(&env);
        env.storage()
            .instance()
            .set(&MockKey::Available(id.clone()), &true);
        id
    }

    pub fn url_of(env: Env, whitelist_id: BytesN<32>) -> Option<String> {
        env.storage().instance().get(&MockKey::Url(whitelist_id))
    }

    fn next_id(env: &Env) -> BytesN<32> {
        let count: u32 = env
            .storage()
            .instance()
            .get(&MockKey::Count)
            .unwrap_or(0)
            + 1;
        env.storage().instance().set(&MockKey::Count, &count);
        let mut raw = [0u8; 32];
        raw[28..].copy_from_slice(&count.to_be_bytes());
        BytesN::from_array(env, &raw)
    }
}
